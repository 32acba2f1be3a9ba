//! Fuzzy title matching.
//!
//! Similarity is the Ratcliff/Obershelp ("gestalt") ratio: `2 * M / T`, where
//! `M` is the number of characters in the matching blocks found by recursively
//! taking the longest common substring, and `T` is the combined length.
//!
//! The ratio is not symmetric: longest-match ties resolve to the earliest
//! position in the first string. [`best_match`] passes the candidate first and
//! the query second. The "autojunk" pruning difflib applies when the second
//! string (the query) is 200 characters or longer is not implemented, so very
//! long pasted titles can score differently.

/// Minimum similarity for a candidate to count as a match (inclusive).
pub const MATCH_CUTOFF: f64 = 0.8;

/// Slack when comparing the rapidfuzz upper bound against the current bar.
const BOUND_EPSILON: f64 = 1e-9;

/// The winning candidate of [`best_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub ratio: f64,
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
///
/// Among runs of equal length the one starting earliest in `a` wins, then
/// earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    let width = bhi - blo;
    // run[j + 1] = length of the common run ending at a[i], b[blo + j]
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in 0..width {
            cur[j + 1] = if a[i] == b[blo + j] { prev[j] + 1 } else { 0 };
            let len = cur[j + 1];
            if len > best_len {
                best_i = i + 1 - len;
                best_j = blo + j + 1 - len;
                best_len = len;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_len)
}

/// Total size of all matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![((0, a.len()), (0, b.len()))];

    while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
        if alo >= ahi || blo >= bhi {
            continue;
        }
        let (i, j, len) = longest_match(a, b, (alo, ahi), (blo, bhi));
        if len == 0 {
            continue;
        }
        total += len;
        pending.push(((alo, i), (blo, j)));
        pending.push(((i + len, ahi), (j + len, bhi)));
    }

    total
}

/// Gestalt similarity of `candidate` against `query` in `[0, 1]`, computed
/// over Unicode scalar values.
///
/// Argument order matters for the result. Two empty strings are identical (`1.0`).
pub fn similarity_ratio(candidate: &str, query: &str) -> f64 {
    let a: Vec<char> = candidate.chars().collect();
    let b: Vec<char> = query.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Pick the candidate most similar to `query`, or `None` if nothing reaches `cutoff`.
///
/// Ties keep the earliest candidate, so the caller's ordering (the search
/// service's ranking) decides between equally good titles. A ratio equal to
/// `cutoff` is accepted.
pub fn best_match<S: AsRef<str>>(query: &str, candidates: &[S], cutoff: f64) -> Option<BestMatch> {
    let mut best: Option<BestMatch> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let bar = best.map_or(cutoff, |b| b.ratio);

        // Indel ratio is LCS based, so it never undershoots the gestalt ratio.
        let upper = rapidfuzz::fuzz::ratio(query.chars(), candidate.chars());
        if upper + BOUND_EPSILON < bar {
            continue;
        }

        let ratio = similarity_ratio(candidate, query);
        match best {
            Some(b) if ratio <= b.ratio => {}
            _ => best = Some(BestMatch { index, ratio }),
        }
    }

    let best = best.filter(|b| b.ratio >= cutoff);
    if let Some(b) = best {
        tracing::debug!(index = b.index, ratio = b.ratio, "best candidate");
    } else {
        tracing::debug!(candidates = candidates.len(), "no candidate above cutoff");
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // similarity_ratio
    // =========================================================================

    #[test]
    fn test_ratio_identical() {
        assert_eq!(similarity_ratio("foo bar", "foo bar"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_ratio_disjoint() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_known_values() {
        // Classic difflib examples
        assert!((similarity_ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
        assert!((similarity_ratio("appel", "apple") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_gestalt_not_lcs() {
        // LCS would pair 'a' and 'b' (2 chars); gestalt anchors on the longest
        // block "ab" and then finds nothing on either side of it.
        assert!((similarity_ratio("ab", "ba") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_depends_on_argument_order() {
        assert!((similarity_ratio("tide", "diet") - 0.25).abs() < 1e-12);
        assert!((similarity_ratio("diet", "tide") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_scores_candidate_against_query() {
        // Scored the other way round this pair clears the cutoff (0.8148...)
        let query = "batch normalization accelerating deep network training";
        let candidate = "batch normalization deep accelerating krowten training";
        let forward = similarity_ratio(candidate, query);
        let reverse = similarity_ratio(query, candidate);
        assert!(forward < MATCH_CUTOFF, "candidate-first ratio {forward}");
        assert!(reverse >= MATCH_CUTOFF, "query-first ratio {reverse}");
        assert_eq!(best_match(query, &[candidate], MATCH_CUTOFF), None);
    }

    #[test]
    fn test_ratio_counts_chars_not_bytes() {
        // 'é' is two bytes but one character
        assert!((similarity_ratio("café", "cafe") - 0.75).abs() < 1e-12);
    }

    // =========================================================================
    // best_match
    // =========================================================================

    #[test]
    fn test_best_match_tie_keeps_first() {
        let m = best_match("foo bar", &["foo bar", "foo bar"], MATCH_CUTOFF).unwrap();
        assert_eq!(m.index, 0);
        assert_eq!(m.ratio, 1.0);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let candidates = ["foo baz", "foo bar", "foo ba"];
        let m = best_match("foo bar", &candidates, MATCH_CUTOFF).unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_best_match_equal_ratio_different_text_keeps_first() {
        // Both differ from the query by one trailing character
        let m = best_match("abcdefgh", &["abcdefgX", "abcdefgY"], MATCH_CUTOFF).unwrap();
        assert_eq!(m.index, 0);
    }

    #[test]
    fn test_threshold_exactly_cutoff_accepted() {
        // M = 40, T = 100 -> 0.8
        let query = "x".repeat(40);
        let candidate = format!("{}{}", "x".repeat(40), "y".repeat(20));
        assert_eq!(similarity_ratio(&candidate, &query), 0.8);
        let m = best_match(&query, &[candidate], MATCH_CUTOFF).unwrap();
        assert_eq!(m.index, 0);
    }

    #[test]
    fn test_threshold_just_below_cutoff_rejected() {
        // M = 39, T = 98 -> 0.7959...
        let query = "x".repeat(39);
        let candidate = format!("{}{}", "x".repeat(39), "y".repeat(20));
        let ratio = similarity_ratio(&candidate, &query);
        assert!(ratio > 0.79 && ratio < 0.8);
        assert_eq!(best_match(&query, &[candidate], MATCH_CUTOFF), None);
    }

    #[test]
    fn test_best_match_unrelated() {
        assert_eq!(
            best_match(
                "completely unrelated nonsense zzz",
                &["quantum field theory basics"],
                MATCH_CUTOFF
            ),
            None
        );
    }

    #[test]
    fn test_best_match_empty_candidates() {
        let none: [&str; 0] = [];
        assert_eq!(best_match("anything", &none, MATCH_CUTOFF), None);
    }

    #[test]
    fn test_best_match_later_better_candidate_wins() {
        let candidates = [
            "attention is all you want".to_string(),
            "attention is all you need".to_string(),
        ];
        let m = best_match("attention is all you need", &candidates, MATCH_CUTOFF).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.ratio, 1.0);
    }
}
