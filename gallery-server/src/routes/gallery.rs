use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::assembler;
use crate::state::AppState;
use crate::types::AppError;

/// Response envelope carrying the rendered gallery markup
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    /// Rendered HTML listing every stored image, oldest first
    #[serde(rename = "htmlContent")]
    pub html_content: String,
}

/// Renders the gallery of every stored thumbnail
///
/// # Errors
///
/// Returns `AppError` when enumeration or URL generation fails; no partial
/// markup is returned.
#[instrument(skip(state))]
pub async fn get_gallery(State(state): State<AppState>) -> Result<Json<GalleryResponse>, AppError> {
    let html_content = assembler::assemble_gallery(
        state.store.as_ref(),
        &state.thumbnail_bucket,
        state.renderer.as_ref(),
    )
    .await?;

    Ok(Json(GalleryResponse { html_content }))
}
