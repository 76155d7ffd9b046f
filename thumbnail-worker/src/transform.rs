//! Image decode, bounded resize, and re-encode

use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, ImageFormat};

use crate::worker::error::TransformError;

/// Maximum width and height of a produced thumbnail, in pixels
pub const BOUNDING_BOX: u32 = 400;

/// Computes dimensions fitting `width`x`height` inside a `bound`x`bound` box
///
/// Aspect ratio is preserved: both dimensions are scaled by the same factor,
/// rounded to the nearest pixel with a 1 px floor. Images already inside the
/// box keep their dimensions; the scale factor never exceeds 1.0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let scale_w = f64::from(bound) / f64::from(width);
    let scale_h = f64::from(bound) / f64::from(height);
    let scale = scale_w.min(scale_h).min(1.0);

    let new_w = (f64::from(width) * scale).round() as u32;
    let new_h = (f64::from(height) * scale).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Produces a bounded-dimension derivative of an encoded image
///
/// The payload is decoded, resized to fit the [`BOUNDING_BOX`], and
/// re-encoded in its original format.
///
/// # Errors
///
/// Returns `TransformError::UnsupportedFormat` when the payload cannot be
/// decoded as an image.
pub fn make_thumbnail(payload: &[u8]) -> Result<Vec<u8>, TransformError> {
    let format = image::guess_format(payload)
        .map_err(|e| TransformError::UnsupportedFormat(e.to_string()))?;
    let img = image::load_from_memory_with_format(payload, format)
        .map_err(|e| TransformError::UnsupportedFormat(e.to_string()))?;

    let (target_w, target_h) = fit_within(img.width(), img.height(), BOUNDING_BOX);
    let resized = if (target_w, target_h) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    encode(&resized, format)
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .map_err(|e| TransformError::UnsupportedFormat(format!("re-encode failed: {e}")))?;
    Ok(buf.into_inner())
}
