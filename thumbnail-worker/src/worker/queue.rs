//! SQS consumption of storage change notifications

use std::marker::PhantomData;
use std::sync::Arc;

use aws_sdk_sqs::Client as SqsClient;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur during queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// Receiving messages from the queue failed
    #[error("SQS receive failed: {0}")]
    Receive(String),

    /// Acknowledging a message failed
    #[error("SQS ack failed: {0}")]
    Ack(String),
}

/// Configuration for queue consumption
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Queue URL
    pub queue_url: String,
    /// Maximum number of messages to retrieve per poll
    pub max_messages: i32,
    /// Visibility timeout for received messages (in seconds)
    pub visibility_timeout: i32,
    /// Wait time for long polling (in seconds)
    pub wait_time_seconds: i32,
}

/// Wrapper for received messages with acknowledgment metadata
#[derive(Debug, Clone)]
pub struct QueueMessage<T> {
    /// The deserialized message body
    pub body: T,
    /// Receipt handle for acknowledging the message
    pub receipt_handle: String,
    /// Message ID
    pub message_id: String,
}

/// Generic SQS consumer for JSON message bodies
pub struct EventQueue<T> {
    sqs_client: Arc<SqsClient>,
    config: QueueConfig,
    _phantom: PhantomData<T>,
}

impl<T> EventQueue<T>
where
    T: DeserializeOwned + Send + Sync,
{
    /// Creates a new queue consumer
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `config` - Queue configuration including URL and polling parameters
    #[must_use]
    pub const fn new(sqs_client: Arc<SqsClient>, config: QueueConfig) -> Self {
        Self {
            sqs_client,
            config,
            _phantom: PhantomData,
        }
    }

    /// Polls messages from the queue
    ///
    /// Messages whose bodies fail to deserialize are logged and dropped so a
    /// malformed delivery cannot wedge the queue.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Receive` if the poll operation fails
    pub async fn poll_messages(&self) -> QueueResult<Vec<QueueMessage<T>>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.config.queue_url)
            .max_number_of_messages(self.config.max_messages)
            .visibility_timeout(self.config.visibility_timeout)
            .wait_time_seconds(self.config.wait_time_seconds)
            .send()
            .await
            .map_err(|e| QueueError::Receive(e.to_string()))?;

        let messages = result
            .messages()
            .iter()
            .filter_map(|msg| {
                let body = msg.body()?;
                let receipt_handle = msg.receipt_handle()?.to_string();
                let message_id = msg.message_id()?.to_string();

                match serde_json::from_str::<T>(body) {
                    Ok(parsed) => Some(QueueMessage {
                        body: parsed,
                        receipt_handle,
                        message_id,
                    }),
                    Err(e) => {
                        tracing::error!("Failed to deserialize notification: {}", e);
                        None
                    }
                }
            })
            .collect();

        Ok(messages)
    }

    /// Acknowledges receipt of a message by deleting it from the queue
    ///
    /// # Arguments
    ///
    /// * `receipt_handle` - The receipt handle from the received message
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Ack` if the acknowledgment fails
    pub async fn ack_message(&self, receipt_handle: &str) -> QueueResult<()> {
        self.sqs_client
            .delete_message()
            .queue_url(&self.config.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::Ack(e.to_string()))?;

        Ok(())
    }
}
