//! In-memory object store for tests and local development

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{StoreError, StoreResult};
use crate::store::{ObjectAcl, ObjectStore, ObjectSummary, PresignedUrl};

const PRESIGN_EXPIRY_SECS: u64 = 180;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    acl: ObjectAcl,
    last_modified: DateTime<Utc>,
}

/// Object store held entirely in process memory
///
/// Buckets are created implicitly on first write. Listing returns objects in
/// ascending key order, mirroring S3 enumeration.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    buckets: Mutex<HashMap<String, HashMap<String, StoredObject>>>,
}

impl MemoryObjectStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an object with an explicit last-modified timestamp
    ///
    /// Lets callers arrange a specific modification history instead of the
    /// wall-clock timestamps regular writes record.
    pub fn put_at(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        acl: ObjectAcl,
        last_modified: DateTime<Utc>,
    ) {
        let mut buckets = self.lock();
        buckets.entry(bucket.to_owned()).or_default().insert(
            key.to_owned(),
            StoredObject {
                body,
                acl,
                last_modified,
            },
        );
    }

    /// Returns the access level recorded for an object, if present
    #[must_use]
    pub fn acl_of(&self, bucket: &str, key: &str) -> Option<ObjectAcl> {
        let buckets = self.lock();
        buckets.get(bucket)?.get(key).map(|object| object.acl)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, HashMap<String, StoredObject>>> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        let buckets = self.lock();
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|object| object.body.clone())
            .ok_or_else(|| StoreError::ObjectNotFound {
                key: key.to_owned(),
            })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        acl: ObjectAcl,
    ) -> StoreResult<()> {
        self.put_at(bucket, key, body, acl, Utc::now());
        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        let buckets = self.lock();
        Ok(buckets
            .get(bucket)
            .is_some_and(|objects| objects.contains_key(key)))
    }

    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let mut buckets = self.lock();
        if let Some(objects) = buckets.get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }

    async fn list(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>> {
        let buckets = self.lock();
        let mut summaries: Vec<ObjectSummary> = buckets
            .get(bucket)
            .into_iter()
            .flatten()
            .map(|(key, object)| ObjectSummary {
                key: key.clone(),
                last_modified: object.last_modified,
            })
            .collect();

        summaries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(summaries)
    }

    async fn presign_get(&self, bucket: &str, key: &str) -> StoreResult<PresignedUrl> {
        // Presigning is a local signing operation; like S3, it does not
        // require the object to exist.
        let expires_at = Utc::now() + Duration::from_secs(PRESIGN_EXPIRY_SECS);
        Ok(PresignedUrl {
            url: format!("https://storage.test/{bucket}/{key}?signature=memory"),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryObjectStore::new();
        store
            .put("uploads", "photo.jpg", vec![1, 2, 3], ObjectAcl::Private)
            .await
            .unwrap();

        let body = store.get("uploads", "photo.jpg").await.unwrap();
        assert_eq!(body, vec![1, 2, 3]);
        assert_eq!(
            store.acl_of("uploads", "photo.jpg"),
            Some(ObjectAcl::Private)
        );
    }

    #[tokio::test]
    async fn test_get_missing_object() {
        let store = MemoryObjectStore::new();

        let err = store.get("uploads", "missing.jpg").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::ObjectNotFound { key } if key == "missing.jpg"
        ));
    }

    #[tokio::test]
    async fn test_delete_absent_object_is_ok() {
        let store = MemoryObjectStore::new();
        assert!(store.delete("uploads", "never-existed.jpg").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let store = MemoryObjectStore::new();
        store
            .put("uploads", "photo.jpg", vec![1], ObjectAcl::Private)
            .await
            .unwrap();

        store.delete("uploads", "photo.jpg").await.unwrap();
        assert!(!store.exists("uploads", "photo.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_key() {
        let store = MemoryObjectStore::new();
        for key in ["c.jpg", "a.jpg", "b.jpg"] {
            store
                .put("thumbs", key, vec![0], ObjectAcl::AuthenticatedRead)
                .await
                .unwrap();
        }

        let keys: Vec<String> = store
            .list("thumbs")
            .await
            .unwrap()
            .into_iter()
            .map(|summary| summary.key)
            .collect();
        assert_eq!(keys, ["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[tokio::test]
    async fn test_list_empty_bucket() {
        let store = MemoryObjectStore::new();
        assert!(store.list("thumbs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_presign_encodes_bucket_and_key() {
        let store = MemoryObjectStore::new();
        let presigned = store.presign_get("thumbs", "photo.jpg").await.unwrap();
        assert!(presigned.url.contains("thumbs/photo.jpg"));
        assert!(presigned.expires_at > Utc::now());
    }
}
