// Application constants (no magic values)
use std::time::Duration;

/// How long the daemon waits for the driver to wind down after shutdown (5s)
pub const DRIVER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for one host notifier invocation (5s)
pub const NOTIFIER_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a desktop notification stays on screen (ms).
/// Slightly under a minute so the next one replaces a fresh slot.
pub const NOTIFICATION_EXPIRE_MS: u32 = 55_000;
