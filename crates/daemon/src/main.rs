//! Minute Notifier - Main Entry Point
//! Composition root: configuration, logging, adapter wiring, signal handling

mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use config::{DaemonConfig, SinkKind};
use minute_core::application::constants::DRIVER_SHUTDOWN_TIMEOUT;
use minute_core::application::{
    lifecycle_channel, shutdown_channel, tick_channel, Bootstrap, MinuteTicker, TickerDriver,
};
use minute_core::domain::ChannelSpec;
use minute_core::port::{LocalClock, NotificationSink};
use minute_infra_system::{ConfiguredPermission, ConsoleNotifier, DesktopNotifier, TokioTimer};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::parse();

    // 2. Initialize logging
    let _log_guard = logging::init_logging(config.log_format, config.log_dir())?;

    info!("Minute Notifier v{} starting...", VERSION);
    info!(
        sink = ?config.sink,
        permission = ?config.permission,
        importance = ?config.importance,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let (tick_tx, tick_rx) = tick_channel();
    let (lifecycle_tx, lifecycle_rx) = lifecycle_channel();
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let sink: Arc<dyn NotificationSink> = match config.sink {
        SinkKind::Desktop => Arc::new(DesktopNotifier::new(
            config.notifier_bin.clone(),
            config.app_name.clone(),
        )),
        SinkKind::Console => Arc::new(ConsoleNotifier::stdout(config.console_format())),
    };
    let permission = Arc::new(ConfiguredPermission::new(
        config.permission_policy(),
        config.required_program(),
    ));

    let ticker = MinuteTicker::new(Arc::new(LocalClock), sink.clone(), Arc::new(TokioTimer::new(tick_tx)));
    let bootstrap = Bootstrap::new(sink, permission)
        .with_channel(ChannelSpec::minute().with_importance(config.importance()));
    let driver = TickerDriver::new(ticker, bootstrap);

    // 4. Lifecycle signals (SIGUSR1 pause / SIGUSR2 resume)
    #[cfg(unix)]
    {
        let signals = minute_infra_system::lifecycle_signals::forward_lifecycle_signals(
            lifecycle_tx.clone(),
            shutdown_tx.subscribe(),
        );
        tokio::spawn(async move {
            if let Err(e) = signals.await {
                error!(error = ?e, "Lifecycle signal listener failed");
            }
        });
    }

    // 5. Start the driver
    let driver_handle = tokio::spawn(driver.run(lifecycle_rx, tick_rx, shutdown_rx));

    info!("System ready. Notifications fire at each minute boundary");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    #[cfg(unix)]
    minute_infra_system::lifecycle_signals::wait_for_termination().await?;
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    shutdown_tx.shutdown();
    match tokio::time::timeout(DRIVER_SHUTDOWN_TIMEOUT, driver_handle).await {
        Ok(Ok(stats)) => info!(
            ticks = stats.ticks,
            delivered = stats.delivered,
            delivery_failures = stats.delivery_failures,
            "Driver stopped"
        ),
        Ok(Err(e)) => error!(error = ?e, "Driver task panicked"),
        Err(_) => warn!("Driver did not stop within {:?}", DRIVER_SHUTDOWN_TIMEOUT),
    }
    drop(lifecycle_tx);

    info!("Shutdown complete.");

    Ok(())
}
