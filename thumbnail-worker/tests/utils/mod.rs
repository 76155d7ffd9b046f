use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use serde_json::json;
use thumbnail_worker::worker::event::StorageEvent;

/// Encodes a solid image of the given dimensions in the given format
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

/// Decodes a payload and returns its (width, height)
pub fn decoded_dimensions(payload: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(payload).expect("decode payload");
    (img.width(), img.height())
}

/// Builds a notification naming the given objects, one record per key
pub fn upload_event(bucket: &str, keys: &[&str]) -> StorageEvent {
    let records: Vec<serde_json::Value> = keys
        .iter()
        .map(|key| {
            json!({
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": key }
                }
            })
        })
        .collect();

    serde_json::from_value(json!({ "Records": records })).expect("build event")
}
