//! HTTP service exposing the crawler
//!
//! Routes:
//! - `POST /scrape` runs a crawl and returns its report
//! - `GET /files/*filename` serves a stored artifact
//! - `GET /health` reports liveness without authentication

mod app;
mod middleware;
mod routes;

pub use app::{build_app, serve, AppState};
pub use middleware::{require_api_key, API_KEY_HEADER};
pub use routes::{file_handler, health_handler, scrape_handler, ScrapeRequest};
