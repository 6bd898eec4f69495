// Startup sequence: register the channel, then settle the permission precondition

use crate::domain::ChannelSpec;
use crate::port::{NotificationSink, PermissionProbe, PermissionStatus};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Bootstrap {
    sink: Arc<dyn NotificationSink>,
    permission: Arc<dyn PermissionProbe>,
    channel: ChannelSpec,
}

impl Bootstrap {
    pub fn new(sink: Arc<dyn NotificationSink>, permission: Arc<dyn PermissionProbe>) -> Self {
        Self {
            sink,
            permission,
            channel: ChannelSpec::minute(),
        }
    }

    /// Register `channel` instead of the default minute channel
    pub fn with_channel(mut self, channel: ChannelSpec) -> Self {
        self.channel = channel;
        self
    }

    /// Create the notification channel and resolve the permission.
    ///
    /// A channel failure is logged and does not block startup; delivery will
    /// surface its own errors. Permission is requested only when the host
    /// has not decided yet.
    pub async fn prepare(&self) -> PermissionStatus {
        match self.sink.create_channel(&self.channel).await {
            Ok(()) => info!(channel = %self.channel.id.as_str(), "Notification channel ready"),
            Err(e) => warn!(
                channel = %self.channel.id.as_str(),
                error = %e,
                "Failed to create notification channel"
            ),
        }

        let status = match self.permission.check().await {
            PermissionStatus::NotDetermined => {
                info!("Requesting permission to post notifications");
                self.permission.request().await
            }
            decided => decided,
        };

        if status.is_granted() {
            info!("Permission to post notifications granted");
        } else {
            warn!(status = ?status, "Permission to post notifications not granted; ticker stays paused");
        }

        status
    }
}
