//! Mock search provider for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{SearchProvider, SearchRecord};
use crate::CoreError;

/// A configurable mock response for [`MockProvider`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return these records in order.
    Records(Vec<SearchRecord>),
    /// Simulate a non-success HTTP status from the upstream service.
    HttpStatus(u16),
    /// Simulate an unparsable feed.
    Xml(String),
}

/// A hand-rolled mock implementing [`SearchProvider`] for tests.
///
/// Returns the same response on every call and records the keywords it was
/// asked for.
pub struct MockProvider {
    response: MockResponse,
    call_count: AtomicUsize,
    last_keywords: Mutex<Option<Vec<String>>>,
}

impl MockProvider {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            call_count: AtomicUsize::new(0),
            last_keywords: Mutex::new(None),
        }
    }

    /// Shorthand for a mock that returns `records`.
    pub fn with_records(records: Vec<SearchRecord>) -> Self {
        Self::new(MockResponse::Records(records))
    }

    /// How many times `search()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Keywords passed to the most recent `search()` call.
    pub fn last_keywords(&self) -> Option<Vec<String>> {
        self.last_keywords
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SearchProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn search<'a>(
        &'a self,
        keywords: &'a [String],
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchRecord>, CoreError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_keywords
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(keywords.to_vec());
        let response = self.response.clone();

        Box::pin(async move {
            match response {
                MockResponse::Records(records) => Ok(records),
                MockResponse::HttpStatus(code) => Err(CoreError::HttpStatus(code)),
                MockResponse::Xml(msg) => Err(CoreError::Xml(msg)),
            }
        })
    }
}
