use std::net::SocketAddr;
use std::sync::Arc;

use arxiv_finder_core::{Config, config_file};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod handlers;
mod models;
mod state;
mod template;

use state::AppState;

/// Apply `ARXIV_FINDER_HOST`, `ARXIV_FINDER_PORT` and `ARXIV_API_URL` on top of the file config.
fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("ARXIV_FINDER_HOST") {
        config.host = host;
    }
    if let Some(port) = var("ARXIV_FINDER_PORT") {
        match port.parse() {
            Ok(p) => config.port = p,
            Err(_) => tracing::warn!(value = %port, "ignoring invalid ARXIV_FINDER_PORT"),
        }
    }
    if let Some(url) = var("ARXIV_API_URL") {
        config.api_url = url;
    }
}

fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/",
            axum::routing::get(handlers::index::index).post(handlers::index::find),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::from_file(&config_file::load_config());
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    let client = reqwest::Client::builder()
        .user_agent(concat!("arxiv-finder/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let provider = Arc::new(config.arxiv_provider());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(api_url = %config.api_url, max_results = config.max_results, "using arXiv");

    let state = Arc::new(AppState {
        config,
        client,
        provider,
    });

    let app = router(state);

    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
