// Minute Notifier Infrastructure - System Adapters
// Implements: Timer, NotificationSink, PermissionProbe, lifecycle signals

pub mod console_notifier;
pub mod desktop_notifier;
#[cfg(unix)]
pub mod lifecycle_signals;
pub mod permission_impl;
pub mod tokio_timer;

pub use console_notifier::{ConsoleFormat, ConsoleNotifier};
pub use desktop_notifier::DesktopNotifier;
pub use permission_impl::{find_in_path, ConfiguredPermission, PermissionPolicy};
pub use tokio_timer::TokioTimer;
