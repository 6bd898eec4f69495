// Notification Domain Model
// Payload handed to the notification sink plus the fixed channel it lives in

use serde::{Deserialize, Serialize};

use crate::domain::TimeSample;

/// Process-wide channel identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Notification slot identifier; delivering to the same id replaces the previous one
pub type NotificationId = u32;

/// Delivery priority carried in the payload; minute notifications always use the default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Default,
}

/// Channel importance; sinks map it to their own urgency levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Importance {
    Low,
    Default,
    High,
}

/// Channel every minute notification is posted under
pub const MINUTE_CHANNEL_ID: &str = "minute_channel";
pub const MINUTE_CHANNEL_NAME: &str = "Minute Notifications";
pub const MINUTE_CHANNEL_DESCRIPTION: &str = "Channel for minute notifications";

/// Single notification slot (each delivery overwrites the prior one)
pub const MINUTE_NOTIFICATION_ID: NotificationId = 1;

pub const MINUTE_NOTIFICATION_TITLE: &str = "Minute Notification";

/// Freedesktop icon name used for the info glyph
pub const MINUTE_NOTIFICATION_ICON: &str = "dialog-information";

/// Channel description, created once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: ChannelId,
    pub name: String,
    pub description: String,
    pub importance: Importance,
}

impl ChannelSpec {
    /// The fixed channel for minute notifications
    pub fn minute() -> Self {
        Self {
            id: ChannelId::new(MINUTE_CHANNEL_ID),
            name: MINUTE_CHANNEL_NAME.to_string(),
            description: MINUTE_CHANNEL_DESCRIPTION.to_string(),
            importance: Importance::Default,
        }
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }
}

/// Notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: ChannelId,
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub icon: String,
    pub priority: Priority,
    /// Dismiss when the user taps it
    pub auto_cancel: bool,
}

impl Notification {
    /// Build the minute notification for the given wall-clock reading
    pub fn minute(sample: &TimeSample) -> Self {
        Self {
            channel: ChannelId::new(MINUTE_CHANNEL_ID),
            id: MINUTE_NOTIFICATION_ID,
            title: MINUTE_NOTIFICATION_TITLE.to_string(),
            body: format!("It's exactly {}", sample.clock_label()),
            icon: MINUTE_NOTIFICATION_ICON.to_string(),
            priority: Priority::Default,
            auto_cancel: true,
        }
    }
}
