use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use media_store::{MemoryObjectStore, ObjectAcl};
use tower::ServiceExt;

use gallery_server::assembler::assemble_gallery;
use gallery_server::render::HtmlGalleryRenderer;
use gallery_server::routes;
use gallery_server::state::AppState;

const THUMBNAILS: &str = "photo-thumbnails";

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn put_thumbnail(store: &MemoryObjectStore, key: &str, modified_at: i64) {
    store.put_at(
        THUMBNAILS,
        key,
        vec![0xff, 0xd8, 0xff],
        ObjectAcl::AuthenticatedRead,
        timestamp(modified_at),
    );
}

fn app_state(store: Arc<MemoryObjectStore>) -> AppState {
    AppState {
        store,
        renderer: Arc::new(HtmlGalleryRenderer),
        thumbnail_bucket: THUMBNAILS.to_string(),
    }
}

/// Position of a key's URL within the rendered markup
fn position_of(markup: &str, key: &str) -> usize {
    markup
        .find(key)
        .unwrap_or_else(|| panic!("expected a URL for {key} in {markup}"))
}

#[tokio::test]
async fn test_empty_bucket_renders_no_entries() {
    let store = MemoryObjectStore::new();

    let markup = assemble_gallery(&store, THUMBNAILS, &HtmlGalleryRenderer)
        .await
        .unwrap();

    assert!(!markup.contains("<img"));
}

#[tokio::test]
async fn test_urls_ordered_by_ascending_last_modified() {
    let store = MemoryObjectStore::new();
    put_thumbnail(&store, "newest.jpg", 300);
    put_thumbnail(&store, "oldest.jpg", 100);
    put_thumbnail(&store, "middle.jpg", 200);

    let markup = assemble_gallery(&store, THUMBNAILS, &HtmlGalleryRenderer)
        .await
        .unwrap();

    let oldest = position_of(&markup, "oldest.jpg");
    let middle = position_of(&markup, "middle.jpg");
    let newest = position_of(&markup, "newest.jpg");
    assert!(oldest < middle && middle < newest);
}

#[tokio::test]
async fn test_equal_timestamps_keep_enumeration_order() {
    let store = MemoryObjectStore::new();
    put_thumbnail(&store, "b.jpg", 100);
    put_thumbnail(&store, "a.jpg", 100);

    let markup = assemble_gallery(&store, THUMBNAILS, &HtmlGalleryRenderer)
        .await
        .unwrap();

    // The store enumerates keys in ascending order; ties must not reorder
    assert!(position_of(&markup, "a.jpg") < position_of(&markup, "b.jpg"));
}

#[tokio::test]
async fn test_two_thumbnails_scenario() {
    let store = MemoryObjectStore::new();
    put_thumbnail(&store, "a.jpg", 1);
    put_thumbnail(&store, "b.jpg", 2);

    let markup = assemble_gallery(&store, THUMBNAILS, &HtmlGalleryRenderer)
        .await
        .unwrap();

    assert_eq!(markup.matches("<img").count(), 2);
    assert!(position_of(&markup, "a.jpg") < position_of(&markup, "b.jpg"));
}

// HTTP surface tests

#[tokio::test]
async fn test_gallery_endpoint_returns_html_content() {
    let store = Arc::new(MemoryObjectStore::new());
    put_thumbnail(&store, "a.jpg", 1);
    put_thumbnail(&store, "b.jpg", 2);

    let app = routes::router(app_state(store));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let markup = json["htmlContent"].as_str().expect("htmlContent string");
    assert!(position_of(markup, "a.jpg") < position_of(markup, "b.jpg"));
}

#[tokio::test]
async fn test_gallery_endpoint_with_empty_bucket() {
    let store = Arc::new(MemoryObjectStore::new());

    let app = routes::router(app_state(store));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let markup = json["htmlContent"].as_str().expect("htmlContent string");
    assert!(!markup.contains("<img"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let store = Arc::new(MemoryObjectStore::new());

    let app = routes::router(app_state(store));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
