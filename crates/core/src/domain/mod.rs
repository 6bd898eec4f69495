// Domain Layer - Pure minute-alignment logic and payloads

pub mod error;
pub mod notification;
pub mod tick;
pub mod time_sample;

// Re-exports
pub use error::DomainError;
pub use notification::{
    ChannelId, ChannelSpec, Importance, Notification, NotificationId, Priority,
    MINUTE_CHANNEL_ID, MINUTE_NOTIFICATION_ID,
};
pub use tick::{TickDecision, TickId, TickerState, MINUTE};
pub use time_sample::TimeSample;
