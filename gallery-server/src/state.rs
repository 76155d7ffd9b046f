use std::sync::Arc;

use media_store::ObjectStore;

use crate::render::GalleryRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage capability holding the thumbnail objects
    pub store: Arc<dyn ObjectStore>,
    /// Rendering collaborator for the gallery markup
    pub renderer: Arc<dyn GalleryRenderer>,
    /// Bucket containing the thumbnails
    pub thumbnail_bucket: String,
}
