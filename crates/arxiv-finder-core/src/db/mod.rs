//! Search provider trait and implementations.

pub mod arxiv;
pub mod mock;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::CoreError;

/// One result returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRecord {
    pub title: String,
    /// Abstract URL, e.g. `http://arxiv.org/abs/1706.03762v5`.
    pub id: String,
    /// Full author names in listed order.
    pub authors: Vec<String>,
}

/// A search service that returns candidate papers for a keyword query.
pub trait SearchProvider: Send + Sync {
    /// Display name of the provider (e.g., "arXiv").
    fn name(&self) -> &str;

    /// Search for papers containing all `keywords`.
    ///
    /// Results keep the service's own ranking order.
    fn search<'a>(
        &'a self,
        keywords: &'a [String],
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchRecord>, CoreError>> + Send + 'a>>;
}
