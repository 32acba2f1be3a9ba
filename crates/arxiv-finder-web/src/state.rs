use arxiv_finder_core::{Config, SearchProvider};
use std::sync::Arc;

/// Shared application state accessible from all handlers.
///
/// Everything here is read-only after startup; each request builds its own
/// lookup data.
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
    pub provider: Arc<dyn SearchProvider>,
}
