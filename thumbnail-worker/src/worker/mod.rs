//! SQS-driven thumbnail worker

pub mod config;
pub mod error;
pub mod event;
pub mod processor;
pub mod queue;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use media_store::S3ObjectStore;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::types::Environment;

use self::config::WorkerConfig;
use self::event::StorageEvent;
use self::processor::NotificationProcessor;
use self::queue::{EventQueue, QueueMessage};

const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Worker that consumes change notifications and produces thumbnails
pub struct ThumbnailWorker {
    queue: EventQueue<StorageEvent>,
    processor: NotificationProcessor,
    shutdown_token: CancellationToken,
}

impl ThumbnailWorker {
    /// Creates a worker wired to S3 and SQS for the given environment
    pub async fn new(env: &Environment) -> anyhow::Result<Self> {
        let config = WorkerConfig::from_environment(env);

        let s3_client = S3Client::from_conf(env.s3_client_config().await);
        let store = Arc::new(S3ObjectStore::new(s3_client));

        let sqs_client = Arc::new(SqsClient::from_conf(env.sqs_client_config().await));
        let queue = EventQueue::new(sqs_client, config.queue.clone());

        let processor =
            NotificationProcessor::new(store, config.thumbnail_bucket, config.record_mode);

        Ok(Self {
            queue,
            processor,
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Returns a clone of the shutdown token for external control
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Runs the poll/process/ack loop until shutdown
    ///
    /// # Errors
    ///
    /// Currently always returns `Ok`; the signature leaves room for startup
    /// failures surfaced by future collaborators.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Thumbnail worker started");

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Thumbnail worker received shutdown signal");
                    break;
                }
                polled = self.queue.poll_messages() => {
                    match polled {
                        Ok(messages) => {
                            for message in messages {
                                self.handle_message(message).await;
                            }
                        }
                        Err(e) => {
                            error!("Failed to poll notifications: {e}");
                            tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                        }
                    }
                }
            }
        }

        info!("Thumbnail worker stopped");
        Ok(())
    }

    async fn handle_message(&self, message: QueueMessage<StorageEvent>) {
        match self.processor.process_event(&message.body).await {
            Ok(()) => {
                if let Err(e) = self.queue.ack_message(&message.receipt_handle).await {
                    warn!(
                        message_id = %message.message_id,
                        "Failed to ack processed notification: {e}"
                    );
                }
            }
            Err(e) => {
                // Left unacked: the message reappears after the visibility
                // timeout and the platform retries the whole notification.
                error!(
                    message_id = %message.message_id,
                    "Notification processing failed: {e}"
                );
            }
        }
    }
}
