//! Worker configuration

use std::env;

use crate::types::Environment;

use super::queue::QueueConfig;

/// Selects how multi-record notifications are handled
///
/// Upload notifications normally carry a single record, but the platform
/// may batch several changes into one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Process every record, isolating failures per record
    #[default]
    All,
    /// Process only the first record and ignore the rest
    First,
}

impl RecordMode {
    /// Parses the `EVENT_RECORD_MODE` environment variable
    ///
    /// # Panics
    ///
    /// Panics on an unrecognized value
    #[must_use]
    pub fn from_env() -> Self {
        let mode = env::var("EVENT_RECORD_MODE")
            .unwrap_or_else(|_| "all".to_string())
            .trim()
            .to_lowercase();

        match mode.as_str() {
            "all" => Self::All,
            "first" => Self::First,
            _ => panic!("Invalid EVENT_RECORD_MODE: {mode}"),
        }
    }
}

/// Configuration for the thumbnail worker
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Bucket receiving the produced thumbnails
    pub thumbnail_bucket: String,
    /// Notification queue settings
    pub queue: QueueConfig,
    /// Handling of multi-record notifications
    pub record_mode: RecordMode,
}

impl WorkerConfig {
    /// Creates a new `WorkerConfig` from the given environment
    #[must_use]
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            thumbnail_bucket: env.thumbnail_bucket(),
            queue: QueueConfig {
                queue_url: env.upload_event_queue_url(),
                max_messages: 10,
                visibility_timeout: 60,
                wait_time_seconds: 20,
            },
            record_mode: RecordMode::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_record_mode_default() {
        env::remove_var("EVENT_RECORD_MODE");
        assert_eq!(RecordMode::from_env(), RecordMode::All);
    }

    #[test]
    #[serial]
    fn test_record_mode_first() {
        env::set_var("EVENT_RECORD_MODE", "first");
        assert_eq!(RecordMode::from_env(), RecordMode::First);
        env::remove_var("EVENT_RECORD_MODE");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid EVENT_RECORD_MODE: sometimes")]
    fn test_record_mode_invalid() {
        env::set_var("EVENT_RECORD_MODE", "sometimes");
        let _ = RecordMode::from_env();
        env::remove_var("EVENT_RECORD_MODE");
    }
}
