//! Processes one storage change notification

use std::sync::Arc;

use media_store::{ObjectAcl, ObjectStore, StoreError};
use tracing::{info, warn};

use crate::transform;

use super::config::RecordMode;
use super::error::{TransformError, TransformResult};
use super::event::{EventRecord, StorageEvent};

/// Applies the transform pipeline to the objects named by a notification
pub struct NotificationProcessor {
    store: Arc<dyn ObjectStore>,
    thumbnail_bucket: String,
    record_mode: RecordMode,
}

impl NotificationProcessor {
    /// Creates a new `NotificationProcessor`
    ///
    /// # Arguments
    ///
    /// * `store` - Storage capability for both the source and thumbnail buckets
    /// * `thumbnail_bucket` - Bucket receiving the produced thumbnails
    /// * `record_mode` - Handling of multi-record notifications
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        thumbnail_bucket: String,
        record_mode: RecordMode,
    ) -> Self {
        Self {
            store,
            thumbnail_bucket,
            record_mode,
        }
    }

    /// Processes the records selected by the configured mode
    ///
    /// In [`RecordMode::All`], records are processed sequentially and a
    /// failing record does not prevent the remaining ones from being
    /// attempted; the first failure is returned afterwards so delivery-level
    /// retry redelivers the notification.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidEvent` for a notification without
    /// records, or the first per-record failure.
    pub async fn process_event(&self, event: &StorageEvent) -> TransformResult<()> {
        if event.records.is_empty() {
            return Err(TransformError::InvalidEvent(
                "notification contains no records".to_string(),
            ));
        }

        let records: &[EventRecord] = match self.record_mode {
            RecordMode::All => &event.records,
            RecordMode::First => {
                if event.records.len() > 1 {
                    warn!(
                        ignored = event.records.len() - 1,
                        "ignoring additional records in batched notification"
                    );
                }
                &event.records[..1]
            }
        };

        let mut first_failure = None;
        for record in records {
            if let Err(e) = self.process_record(record).await {
                warn!("Record processing failed: {e}");
                first_failure.get_or_insert(e);
            }
        }

        first_failure.map_or(Ok(()), Err)
    }

    /// Fetches, resizes, publishes, then retires one source object
    async fn process_record(&self, record: &EventRecord) -> TransformResult<()> {
        let (bucket, key) = record.object_ref()?;

        let payload = match self.store.get(bucket, key).await {
            Ok(payload) => payload,
            Err(err @ StoreError::ObjectNotFound { .. }) => {
                // A redelivered notification finds its source already
                // retired; if the thumbnail is in place there is nothing
                // left to do.
                if self.store.exists(&self.thumbnail_bucket, key).await? {
                    info!(key, "thumbnail already published, skipping replay");
                    return Ok(());
                }
                return Err(err.into());
            }
            Err(e) => return Err(e.into()),
        };

        let derivative = transform::make_thumbnail(&payload)?;

        self.store
            .put(
                &self.thumbnail_bucket,
                key,
                derivative,
                ObjectAcl::AuthenticatedRead,
            )
            .await?;

        // The derivative must be durable before the source is removed.
        self.store.delete(bucket, key).await?;

        info!(key, "published thumbnail and retired source");
        Ok(())
    }
}
