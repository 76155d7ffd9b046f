//! Typed storage change-notification event
//!
//! Only the fields the worker consumes are modeled; any additional metadata
//! in the platform payload is ignored during deserialization.

use serde::Deserialize;

use super::error::TransformError;

/// A storage change notification as delivered to the queue
#[derive(Debug, Clone, Deserialize)]
pub struct StorageEvent {
    /// Change records, one per created or updated object
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}

/// One object-level change within a notification
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    /// Storage payload of the record
    pub s3: S3Entity,
}

/// Bucket and object named by a change record
#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    /// Bucket holding the changed object
    pub bucket: BucketRef,
    /// The changed object
    pub object: ObjectRef,
}

/// Reference to a bucket by name
#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    /// Bucket name
    pub name: String,
}

/// Reference to an object by key
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    /// Object key
    pub key: String,
}

impl EventRecord {
    /// Returns the (bucket, key) pair named by this record
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidEvent` when either field is blank.
    pub fn object_ref(&self) -> Result<(&str, &str), TransformError> {
        let bucket = self.s3.bucket.name.trim();
        let key = self.s3.object.key.trim();

        if bucket.is_empty() || key.is_empty() {
            return Err(TransformError::InvalidEvent(
                "record names an empty bucket or key".to_string(),
            ));
        }

        Ok((bucket, key))
    }
}
