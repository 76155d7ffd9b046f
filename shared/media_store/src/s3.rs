//! S3-backed object store

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::head_object::HeadObjectError,
    presigning::PresigningConfig,
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{ObjectAcl, ObjectStore, ObjectSummary, PresignedUrl};

const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 15 * 60;

/// Object store backed by S3
pub struct S3ObjectStore {
    client: Client,
    presign_expiry_secs: u64,
}

impl S3ObjectStore {
    /// Creates a new S3-backed store with the default presign expiry
    ///
    /// # Arguments
    ///
    /// * `client` - Pre-configured S3 client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
        }
    }

    /// Overrides the expiry applied to generated presigned URLs
    #[must_use]
    pub const fn with_presign_expiry(mut self, presign_expiry_secs: u64) -> Self {
        self.presign_expiry_secs = presign_expiry_secs;
        self
    }
}

/// Maps an SDK failure onto the storage error taxonomy
///
/// `NoSuchKey` becomes `ObjectNotFound`; an `AccessDenied` code or a 403
/// becomes `AccessDenied`; everything else, including dispatch and timeout
/// failures, is `Unavailable` and left to invocation-level retry.
fn classify<E>(error: &SdkError<E>, key: &str) -> StoreError
where
    E: ProvideErrorMetadata,
{
    if let SdkError::ServiceError(service_err) = error {
        let code = service_err.err().code().unwrap_or_default();
        if code == "NoSuchKey" {
            return StoreError::ObjectNotFound {
                key: key.to_owned(),
            };
        }

        let status = service_err.raw().status().as_u16();
        if code == "AccessDenied" || status == 403 {
            return StoreError::AccessDenied(format!("S3 denied access to {key}"));
        }

        return StoreError::Unavailable(format!("S3 error {code} (HTTP {status}) on {key}"));
    }

    StoreError::Unavailable(error.to_string())
}

fn canned_acl(acl: ObjectAcl) -> ObjectCannedAcl {
    match acl {
        ObjectAcl::AuthenticatedRead => ObjectCannedAcl::AuthenticatedRead,
        ObjectAcl::Private => ObjectCannedAcl::Private,
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        debug!(bucket, key, "fetching object");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&e, key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to read body of {key}: {e}")))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        acl: ObjectAcl,
    ) -> StoreResult<()> {
        debug!(bucket, key, size = body.len(), "writing object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(canned_acl(acl))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify(&e, key))?;

        Ok(())
    }

    async fn exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        debug!(bucket, key, "checking object existence");

        let result = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                // A 404 is the expected answer for an absent object
                if let SdkError::ServiceError(service_err) = &e {
                    if matches!(service_err.err(), HeadObjectError::NotFound(_)) {
                        return Ok(false);
                    }
                }

                Err(classify(&e, key))
            }
        }
    }

    async fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        debug!(bucket, key, "deleting object");

        let result = self
            .client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match classify(&e, key) {
                // S3 already reports deletes of absent keys as success; an
                // explicit not-found gets the same treatment.
                StoreError::ObjectNotFound { .. } => Ok(()),
                other => Err(other),
            },
        }
    }

    async fn list(&self, bucket: &str) -> StoreResult<Vec<ObjectSummary>> {
        let mut summaries = Vec::new();

        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| classify(&e, bucket))?;

            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                let last_modified = object
                    .last_modified()
                    .and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()))
                    .unwrap_or_default();

                summaries.push(ObjectSummary {
                    key: key.to_owned(),
                    last_modified,
                });
            }
        }

        debug!(bucket, count = summaries.len(), "listed objects");
        Ok(summaries)
    }

    async fn presign_get(&self, bucket: &str, key: &str) -> StoreResult<PresignedUrl> {
        let presigning_config =
            PresigningConfig::expires_in(Duration::from_secs(self.presign_expiry_secs)).map_err(
                |e| StoreError::Unavailable(format!("failed to create presigning config: {e}")),
            )?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| classify(&e, key))?;

        let expires_at: DateTime<Utc> = Utc::now() + Duration::from_secs(self.presign_expiry_secs);

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at,
        })
    }
}
