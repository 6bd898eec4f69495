// Application Layer - Ticker, startup sequence and driver loop

pub mod bootstrap;
pub mod constants;
pub mod driver;
pub mod ticker;

// Re-exports
pub use bootstrap::Bootstrap;
pub use driver::{
    lifecycle_channel, shutdown_channel, tick_channel, LifecycleEvent, LifecycleReceiver,
    LifecycleSender, ShutdownSender, ShutdownToken, TickReceiver, TickSender, TickerDriver,
};
pub use ticker::{MinuteTicker, TickerStats};
