//! Minute Ticker - self-rescheduling timer aligned to wall-clock minute boundaries
//!
//! Every tick reads the clock, decides whether it sits exactly on a minute
//! boundary (fire + wait 60s) or not (wait until the boundary), and submits a
//! fresh scheduled tick to the timer. The ticker owns at most one pending
//! handle; `stop` cancels it.

use crate::domain::{Notification, TickDecision, TickId, TickerState};
use crate::port::{Clock, NotificationSink, ScheduledTick, Timer, TimerHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counters kept for the lifetime of one ticker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerStats {
    /// Ticks that ran a cycle (including the inline one in `start`)
    pub ticks: u64,
    pub delivered: u64,
    pub delivery_failures: u64,
    /// Ticks dropped because they were cancelled or arrived while paused
    pub stale_ticks: u64,
    /// On-boundary cycles that found their minute already fired (restart within the same second)
    pub repeated_boundaries: u64,
}

pub struct MinuteTicker {
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
    timer: Arc<dyn Timer>,
    state: TickerState,
    pending: Option<Box<dyn TimerHandle>>,
    last_id: TickId,
    /// (hour, minute) of the last boundary that fired
    last_fired: Option<(u32, u32)>,
    stats: TickerStats,
}

impl MinuteTicker {
    /// Create a paused ticker
    pub fn new(
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            clock,
            sink,
            timer,
            state: TickerState::Paused,
            pending: None,
            last_id: TickId::new(0),
            last_fired: None,
            stats: TickerStats::default(),
        }
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    /// Id of the pending tick, if any
    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending.as_ref().map(|handle| handle.id())
    }

    pub fn stats(&self) -> TickerStats {
        self.stats
    }

    /// Enter Active and run one cycle right away.
    ///
    /// On a boundary this fires immediately and schedules +60s; otherwise it
    /// only schedules the wait until the boundary. A pending tick from an
    /// earlier start is cancelled first. A boundary that already fired is
    /// not fired again when the ticker restarts within the same second.
    pub async fn start(&mut self) {
        self.cancel_pending();

        match self.state.activate() {
            Ok(next) => {
                self.state = next;
                info!("Minute ticker started");
            }
            Err(_) => debug!("Minute ticker already active, re-synchronizing"),
        }

        self.run_cycle().await;
    }

    /// Cancel the pending tick and enter Paused. No-op when nothing is pending.
    pub fn stop(&mut self) {
        self.cancel_pending();

        if let Ok(next) = self.state.suspend() {
            self.state = next;
            info!(stats = ?self.stats, "Minute ticker paused");
        }
    }

    /// Handle a tick delivered by the timer.
    ///
    /// Returns false when the tick was stale (not the pending id, or paused).
    pub async fn on_tick(&mut self, id: TickId) -> bool {
        let is_current = self.state == TickerState::Active && self.pending_tick() == Some(id);
        if !is_current {
            self.stats.stale_ticks += 1;
            debug!(tick = %id, pending = ?self.pending_tick(), state = %self.state, "Ignoring stale tick");
            return false;
        }

        // Already fired; nothing left to cancel
        self.pending = None;
        self.run_cycle().await;
        true
    }

    async fn run_cycle(&mut self) {
        let sample = self.clock.now();
        let decision = TickDecision::for_sample(&sample);
        self.stats.ticks += 1;

        debug!(
            time = %sample,
            fire = decision.fire,
            next_delay_ms = decision.next_delay.as_millis() as u64,
            "Tick"
        );

        let boundary = (sample.hour(), sample.minute());
        if decision.fire && self.last_fired == Some(boundary) {
            self.stats.repeated_boundaries += 1;
            debug!(time = %sample, "Boundary already fired, not repeating");
        } else if decision.fire {
            self.last_fired = Some(boundary);
            let notification = Notification::minute(&sample);
            match self.sink.deliver(&notification).await {
                Ok(()) => {
                    self.stats.delivered += 1;
                    info!(body = %notification.body, "Minute notification delivered");
                }
                Err(e) => {
                    // No retry: the next boundary brings a fresh notification
                    self.stats.delivery_failures += 1;
                    warn!(error = %e, "Minute notification delivery failed");
                }
            }
        }

        self.schedule(decision.next_delay);
    }

    fn schedule(&mut self, delay: Duration) {
        self.last_id = self.last_id.next();
        let handle = self.timer.schedule(ScheduledTick {
            id: self.last_id,
            delay,
        });
        self.pending = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!(tick = %handle.id(), "Cancelling pending tick");
            handle.cancel();
        }
    }
}
