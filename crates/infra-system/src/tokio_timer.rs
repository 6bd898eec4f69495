// Tokio-backed Timer
// Each scheduled tick is a sleeping task that posts its id back to the driver.
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::trace;

use minute_core::application::TickSender;
use minute_core::domain::TickId;
use minute_core::port::{ScheduledTick, Timer, TimerHandle};

pub struct TokioTimer {
    runtime: Handle,
    ticks: TickSender,
}

impl TokioTimer {
    /// Create a timer bound to the current runtime
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn new(ticks: TickSender) -> Self {
        Self {
            runtime: Handle::current(),
            ticks,
        }
    }
}

impl Timer for TokioTimer {
    fn schedule(&self, tick: ScheduledTick) -> Box<dyn TimerHandle> {
        let ticks = self.ticks.clone();
        let task = self.runtime.spawn(async move {
            sleep(tick.delay).await;
            trace!(tick = %tick.id, "Timer elapsed");
            // Receiver gone means the driver has stopped
            let _ = ticks.send(tick.id);
        });

        Box::new(TokioTimerHandle {
            id: tick.id,
            abort: task.abort_handle(),
        })
    }
}

struct TokioTimerHandle {
    id: TickId,
    abort: AbortHandle,
}

impl TimerHandle for TokioTimerHandle {
    fn id(&self) -> TickId {
        self.id
    }

    // A tick that already slipped into the channel is dropped by the ticker as stale
    fn cancel(self: Box<Self>) {
        self.abort.abort();
    }
}
