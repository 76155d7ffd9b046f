//! Error types for notification processing

use media_store::StoreError;
use thiserror::Error;

/// Result type for notification processing
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur while transforming an uploaded image
#[derive(Error, Debug)]
pub enum TransformError {
    /// Notification payload is missing required fields or names blank ones
    #[error("invalid notification: {0}")]
    InvalidEvent(String),

    /// Payload could not be decoded as an image
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Storage operation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
