//! The storage capability consumed by both pipeline stages

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreResult;

/// Access level applied to a stored object at write time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    /// Readable by any authenticated identity, never anonymously
    AuthenticatedRead,
    /// Readable only by the owning account
    Private,
}

/// Key and modification time of one stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,
    /// Last-modified timestamp reported by the store
    pub last_modified: DateTime<Utc>,
}

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// ISO-8601 UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Object-storage operations used by the pipeline
///
/// Bucket names are passed per call so each component is wired to its
/// buckets explicitly.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieves the full byte payload of an object
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ObjectNotFound` if no object exists at the key
    /// and `StoreError::AccessDenied` if the caller lacks read permission.
    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;

    /// Writes an object, overwriting any existing object at the key
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` if the caller lacks write
    /// permission and `StoreError::Unavailable` on service failure.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>, acl: ObjectAcl)
        -> StoreResult<()>;

    /// Checks whether an object exists
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` or `StoreError::Unavailable` when
    /// the probe itself fails; a missing object is `Ok(false)`.
    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool>;

    /// Deletes an object
    ///
    /// Deleting an absent object succeeds, so replayed deliveries that
    /// re-delete an already-retired source stay benign.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` if the caller lacks delete
    /// permission and `StoreError::Unavailable` on service failure.
    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()>;

    /// Lists every object in a bucket
    ///
    /// Implementations must drain all result pages before returning; callers
    /// rely on the listing being complete.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` or `StoreError::Unavailable` when
    /// enumeration fails.
    async fn list(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>>;

    /// Generates a presigned GET URL for an object
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if URL generation fails.
    async fn presign_get(&self, bucket: &str, key: &str) -> StoreResult<PresignedUrl>;
}
