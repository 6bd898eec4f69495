// Notification Sink Port
// Abstraction over the host notification service

use crate::domain::{ChannelSpec, Notification};
use async_trait::async_trait;
use thiserror::Error;

/// Delivery errors
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Notifier exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Notification Sink trait
///
/// Implementations:
/// - DesktopNotifier: spawns the freedesktop `notify-send` binary
/// - ConsoleNotifier: prints payloads to stdout (headless hosts)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Register the channel notifications are posted under.
    /// Called once at startup, before any delivery.
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), DeliveryError>;

    /// Deliver a notification. A delivery with an id already shown replaces it.
    ///
    /// # Errors
    /// - DeliveryError::SpawnFailed if the host notifier cannot be reached
    /// - DeliveryError::NonZeroExit if the host notifier rejected the payload
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Sink that records everything it is handed
    #[derive(Clone, Default)]
    pub struct RecordingSink {
        channels: Arc<Mutex<Vec<ChannelSpec>>>,
        delivered: Arc<Mutex<Vec<Notification>>>,
        failing: Arc<AtomicBool>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every following delivery fail (still recorded as an attempt)
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn channels(&self) -> Vec<ChannelSpec> {
            self.channels.lock().unwrap().clone()
        }

        pub fn delivered(&self) -> Vec<Notification> {
            self.delivered.lock().unwrap().clone()
        }

        pub fn delivered_bodies(&self) -> Vec<String> {
            self.delivered
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.body.clone())
                .collect()
        }

        pub fn delivery_count(&self) -> usize {
            self.delivered.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), DeliveryError> {
            self.channels.lock().unwrap().push(channel.clone());
            Ok(())
        }

        async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
            self.delivered.lock().unwrap().push(notification.clone());
            if self.failing.load(Ordering::SeqCst) {
                return Err(DeliveryError::SpawnFailed("mock sink failing".to_string()));
            }
            Ok(())
        }
    }
}
