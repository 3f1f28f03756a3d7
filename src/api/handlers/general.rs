//! Health check and unmatched-route handlers.

use crate::api::error::ApiError;
use axum::{
    Json,
    extract::OriginalUri,
    http::StatusCode,
    response::IntoResponse,
};

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "resource not found", uri.path())
}
