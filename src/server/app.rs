//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::crawler::CrawlEngine;
use crate::server::middleware::require_api_key;
use crate::server::routes::{file_handler, health_handler, scrape_handler};
use crate::HarvestError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CrawlEngine>,
    /// Budget for requests that omit `max_pages`
    pub default_max_pages: usize,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(engine: CrawlEngine, config: &Config) -> Self {
        Self {
            engine: Arc::new(engine),
            default_max_pages: config.crawler.default_max_pages,
            api_key: Arc::from(config.server.api_key.as_str()),
        }
    }
}

/// Build the Axum application router
///
/// `/scrape` and `/files` sit behind the API key check; `/health` does not.
pub fn build_app(state: AppState) -> Router {
    let api_key = state.api_key.clone();

    let protected = Router::new()
        .route("/scrape", post(scrape_handler))
        .route("/files/*filename", get(file_handler))
        .layer(middleware::from_fn(move |req, next| {
            require_api_key(api_key.clone(), req, next)
        }));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// Opens storage, binds the configured address and serves until shutdown
pub async fn serve(config: &Config) -> Result<(), HarvestError> {
    let engine = CrawlEngine::from_config(config)?;
    let app = build_app(AppState::new(engine, config));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
