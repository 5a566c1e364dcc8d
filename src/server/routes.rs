// HTTP routes

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::content::ArtifactError;
use crate::server::app::AppState;

/// Body of a crawl request
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
    pub max_pages: Option<usize>,
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

/// Runs a crawl and returns its report
///
/// Returns 400 for a missing URL or a zero page budget, and 500 only when
/// the crawl itself aborts.
pub async fn scrape_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return message(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let Some(url) = request.url.filter(|url| !url.trim().is_empty()) else {
        return message(StatusCode::BAD_REQUEST, "No URL provided");
    };

    let max_pages = request.max_pages.unwrap_or(state.default_max_pages);
    if max_pages == 0 {
        return message(StatusCode::BAD_REQUEST, "max_pages must be at least 1");
    }

    match state.engine.crawl(&url, max_pages).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Crawl of {} failed: {}", url, e);
            message(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error occurred while scraping: {}", e),
            )
        }
    }
}

/// Serves a stored artifact with a Content-Type guessed from its name
pub async fn file_handler(
    Extension(state): Extension<AppState>,
    Path(filename): Path<String>,
) -> Response {
    match state.engine.content_store().read_artifact(&filename).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&filename).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Err(ArtifactError::NotFound(_)) | Err(ArtifactError::InvalidName(_)) => {
            message(StatusCode::NOT_FOUND, "File not found")
        }
        Err(e) => {
            warn!("Failed to read artifact {}: {}", filename, e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file")
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
