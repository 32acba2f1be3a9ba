use std::fmt;

use thiserror::Error;

pub mod citation;
pub mod config_file;
pub mod db;
pub mod lookup;
pub mod matching;
pub mod text_utils;

// Re-export for convenience
pub use citation::{Citation, extract_arxiv_id};
pub use db::{SearchProvider, SearchRecord};
pub use lookup::find_citation;
pub use matching::{BestMatch, MATCH_CUTOFF, best_match, similarity_ratio};
pub use text_utils::{extract_keywords, normalize_title, strip_latex_math};

/// Text shown when no candidate reaches the match cutoff.
pub const NO_MATCH: &str = "No match found.";

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned HTTP {0}")]
    HttpStatus(u16),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("feed entry is missing <{0}>")]
    MissingField(&'static str),
    #[error("author name is empty")]
    EmptyAuthorName,
}

/// Outcome of a title lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Citation),
    NoMatch,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(citation) => fmt::Display::fmt(citation, f),
            Lookup::NoMatch => f.write_str(NO_MATCH),
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub max_results: usize,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            api_url: db::arxiv::DEFAULT_API_URL.to_string(),
            max_results: db::arxiv::DEFAULT_MAX_RESULTS,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Fill in defaults for everything the config file leaves unset.
    pub fn from_file(file: &config_file::ConfigFile) -> Self {
        let defaults = Config::default();
        let server = file.server.clone().unwrap_or_default();
        let arxiv = file.arxiv.clone().unwrap_or_default();
        Self {
            host: server.host.unwrap_or(defaults.host),
            port: server.port.unwrap_or(defaults.port),
            api_url: arxiv.api_url.unwrap_or(defaults.api_url),
            max_results: arxiv.max_results.unwrap_or(defaults.max_results),
            timeout_secs: arxiv.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }

    /// The arXiv provider described by this config.
    pub fn arxiv_provider(&self) -> db::arxiv::Arxiv {
        db::arxiv::Arxiv::new(self.api_url.clone(), self.max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_file::{ArxivConfig, ConfigFile};

    #[test]
    fn config_from_empty_file_is_default() {
        let config = Config::from_file(&ConfigFile::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.api_url, "http://export.arxiv.org/api/query");
    }

    #[test]
    fn config_from_file_overrides() {
        let file = ConfigFile {
            arxiv: Some(ArxivConfig {
                max_results: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = Config::from_file(&file);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn lookup_display() {
        assert_eq!(Lookup::NoMatch.to_string(), "No match found.");
        let found = Lookup::Found(Citation {
            last_names: vec!["Vaswani".into(), "Shazeer".into()],
            arxiv_id: "1706.03762".into(),
        });
        assert_eq!(found.to_string(), "Vaswani, Shazeer 1706.03762");
    }
}
