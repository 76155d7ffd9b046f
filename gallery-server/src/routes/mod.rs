mod gallery;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Creates the router for the gallery service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/gallery", get(gallery::get_gallery))
        .with_state(state)
}

/// Simple health check endpoint
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "gallery-server",
        })),
    )
}
