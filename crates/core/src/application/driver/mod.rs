// Ticker Driver - single-task event loop that owns the ticker
//
// Lifecycle events, timer ticks and shutdown are all funnelled into one
// select loop, so the ticker is only ever touched from this task.

mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::bootstrap::Bootstrap;
use crate::application::ticker::{MinuteTicker, TickerStats};
use crate::domain::{TickId, TickerState};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// External trigger events standing in for host visibility changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Resume,
    Pause,
}

/// Posts lifecycle events to the driver
#[derive(Clone)]
pub struct LifecycleSender {
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

impl LifecycleSender {
    /// Returns false once the driver has stopped
    pub fn send(&self, event: LifecycleEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn resume(&self) -> bool {
        self.send(LifecycleEvent::Resume)
    }

    pub fn pause(&self) -> bool {
        self.send(LifecycleEvent::Pause)
    }
}

pub struct LifecycleReceiver {
    rx: mpsc::UnboundedReceiver<LifecycleEvent>,
}

impl LifecycleReceiver {
    /// Next event; None once every sender is dropped
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        self.rx.recv().await
    }
}

pub fn lifecycle_channel() -> (LifecycleSender, LifecycleReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LifecycleSender { tx }, LifecycleReceiver { rx })
}

/// Timers post fired tick ids here
pub type TickSender = mpsc::UnboundedSender<TickId>;
pub type TickReceiver = mpsc::UnboundedReceiver<TickId>;

pub fn tick_channel() -> (TickSender, TickReceiver) {
    mpsc::unbounded_channel()
}

pub struct TickerDriver {
    ticker: MinuteTicker,
    bootstrap: Bootstrap,
    permitted: bool,
}

impl TickerDriver {
    pub fn new(ticker: MinuteTicker, bootstrap: Bootstrap) -> Self {
        Self {
            ticker,
            bootstrap,
            permitted: false,
        }
    }

    /// Run until shutdown; returns the ticker's final counters.
    ///
    /// Starts Paused. The ticker becomes Active only if the permission
    /// precondition holds; otherwise lifecycle events are ignored and no
    /// notification is ever shown.
    pub async fn run(
        mut self,
        mut lifecycle: LifecycleReceiver,
        mut ticks: TickReceiver,
        mut shutdown: ShutdownToken,
    ) -> TickerStats {
        info!("Ticker driver started");

        self.permitted = self.bootstrap.prepare().await.is_granted();
        if self.permitted && !shutdown.is_shutdown() {
            self.ticker.start().await;
        }

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    info!("Ticker driver shutting down");
                    break;
                }
                Some(event) = lifecycle.recv() => self.handle_lifecycle(event).await,
                Some(id) = ticks.recv() => {
                    self.ticker.on_tick(id).await;
                }
                else => {
                    debug!("All event sources closed");
                    break;
                }
            }
        }

        self.ticker.stop();
        let stats = self.ticker.stats();
        info!(stats = ?stats, "Ticker driver stopped");
        stats
    }

    async fn handle_lifecycle(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Resume if !self.permitted => {
                debug!("Resume ignored: notifications not permitted");
            }
            LifecycleEvent::Resume => {
                // Re-synchronize to the next boundary from the resume-time clock
                self.ticker.start().await;
            }
            LifecycleEvent::Pause => {
                if self.ticker.state() == TickerState::Active {
                    self.ticker.stop();
                } else {
                    debug!("Pause ignored: ticker not active");
                }
            }
        }
    }
}
