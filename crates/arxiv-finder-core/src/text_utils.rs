//! Text helpers shared by query construction and title comparison.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline LaTeX math: the shortest `$...$` span on a single line.
static LATEX_MATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$.*?\$").unwrap());

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Remove every inline math span, replacing it with nothing.
///
/// No space is inserted, so `"a$x$b"` becomes `"ab"`.
pub fn strip_latex_math(text: &str) -> String {
    LATEX_MATH_RE.replace_all(text, "").into_owned()
}

/// Unicode whitespace plus the ASCII file/group/record/unit separators
/// (`\x1c`..=`\x1f`), which title text pasted from other tools can carry.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_separator)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical comparison form of a title.
///
/// Steps (order matters):
/// 1. Strip inline `$...$` math
/// 2. Collapse whitespace
/// 3. Full Unicode case folding (`"Straße"` → `"strasse"`)
pub fn normalize_title(text: &str) -> String {
    let stripped = strip_latex_math(text);
    caseless::default_case_fold_str(&collapse_whitespace(&stripped))
}

/// Extract search keywords: every maximal run of word characters, in order.
///
/// Expects text that has already been through [`strip_latex_math`]. Duplicates
/// are kept and no stopwords are dropped; ranking is left to the search service.
pub fn extract_keywords(stripped: &str) -> Vec<String> {
    WORD_RE
        .find_iter(stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}
