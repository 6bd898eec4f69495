// Port Layer - Interfaces for external collaborators

pub mod clock; // For deterministic testing
pub mod notification_sink;
pub mod permission;
pub mod timer;

// Re-exports
pub use clock::{Clock, LocalClock};
pub use notification_sink::{DeliveryError, NotificationSink};
pub use permission::{PermissionProbe, PermissionStatus};
pub use timer::{ScheduledTick, Timer, TimerHandle};
