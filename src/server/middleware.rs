use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// API key middleware
///
/// Requests whose `X-API-Key` header does not equal the configured key are
/// answered with 401 and never reach the handler.
pub async fn require_api_key(expected: Arc<str>, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided == Some(&*expected) {
        return next.run(request).await;
    }

    debug!("Rejected {} {}: bad API key", request.method(), request.uri().path());
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or missing API Key" })),
    )
        .into_response()
}
