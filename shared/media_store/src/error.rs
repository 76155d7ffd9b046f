//! Error types for storage operations

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No object exists at the requested key
    #[error("object not found: {key}")]
    ObjectNotFound {
        /// Key that was requested
        key: String,
    },

    /// The invoking identity lacks permission for the operation
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Transient storage-service failure
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
