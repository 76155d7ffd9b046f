use media_store::{ObjectStore, StoreResult};
use tracing::info;

use crate::render::GalleryRenderer;

/// Builds the gallery markup for every thumbnail currently stored
///
/// Thumbnails are ordered oldest-first by last-modified time; objects
/// sharing a timestamp keep the store's enumeration order. Every object
/// gets a presigned retrieval URL, and the ordered URL sequence is handed
/// to the renderer. An empty bucket is not an error.
///
/// # Errors
///
/// Propagates `StoreError` from enumeration or URL generation.
pub async fn assemble_gallery(
    store: &dyn ObjectStore,
    bucket: &str,
    renderer: &dyn GalleryRenderer,
) -> StoreResult<String> {
    let mut summaries = store.list(bucket).await?;
    info!("Found {} image summaries", summaries.len());

    // Stable sort keeps enumeration order for equal timestamps
    summaries.sort_by_key(|summary| summary.last_modified);

    let mut image_urls = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        let presigned = store.presign_get(bucket, &summary.key).await?;
        image_urls.push(presigned.url);
    }

    Ok(renderer.render(&image_urls))
}
