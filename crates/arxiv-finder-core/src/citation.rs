//! Citation token construction: `"<last names> <arXiv id>"`.

use std::fmt;

use crate::CoreError;
use crate::db::SearchRecord;

/// Bare arXiv identifier from an abstract URL.
///
/// Takes the text after the last `/abs/`, then everything before the first
/// `v`. The split is on the literal character, so ids containing a `v`
/// before the version suffix come out truncated; an input with no `/abs/`
/// is split on `v` as a whole.
pub fn extract_arxiv_id(id_url: &str) -> &str {
    let tail = id_url.rsplit("/abs/").next().unwrap_or(id_url);
    tail.split('v').next().unwrap_or(tail)
}

/// Final whitespace-delimited token of a full name.
pub fn last_name(full_name: &str) -> Result<&str, CoreError> {
    full_name
        .split_whitespace()
        .next_back()
        .ok_or(CoreError::EmptyAuthorName)
}

/// A matched paper reduced to what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub last_names: Vec<String>,
    pub arxiv_id: String,
}

impl Citation {
    /// Build the citation for a search result.
    ///
    /// Fails with [`CoreError::EmptyAuthorName`] if any author name is blank.
    pub fn from_record(record: &SearchRecord) -> Result<Self, CoreError> {
        let last_names = record
            .authors
            .iter()
            .map(|name| last_name(name).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Citation {
            last_names,
            arxiv_id: extract_arxiv_id(&record.id).to_string(),
        })
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.last_names.join(", "), self.arxiv_id)
    }
}
