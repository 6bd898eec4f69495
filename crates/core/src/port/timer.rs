// Timer Port
// Submit a scheduled tick, get back a cancellable handle.
// Implementations never call the ticker; they hand the tick id back to the
// driver's event loop when the delay elapses.

use std::time::Duration;

use crate::domain::TickId;

/// Description of one future tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub id: TickId,
    pub delay: Duration,
}

/// Cancellable reference to a pending tick
pub trait TimerHandle: Send {
    /// Id of the tick this handle guards
    fn id(&self) -> TickId;

    /// Cancel the tick. After this returns the tick is never delivered by the timer.
    fn cancel(self: Box<Self>);
}

/// Timer / event-loop abstraction
pub trait Timer: Send + Sync {
    /// Schedule `tick` to be delivered after `tick.delay`
    fn schedule(&self, tick: ScheduledTick) -> Box<dyn TimerHandle>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct ManualTimerState {
        /// Virtual time since the timer was created
        elapsed: Duration,
        /// (due, post sequence, tick)
        pending: Vec<(Duration, u64, ScheduledTick)>,
        posted: u64,
        history: Vec<ScheduledTick>,
        cancelled: Vec<TickId>,
        max_pending: usize,
    }

    /// Virtual-time timer; ticks come due only through `advance`
    #[derive(Clone, Default)]
    pub struct ManualTimer {
        state: Arc<Mutex<ManualTimerState>>,
    }

    impl ManualTimer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Move virtual time forward; returns due ticks in due order, then post order
        pub fn advance(&self, by: Duration) -> Vec<TickId> {
            let mut state = self.state.lock().unwrap();
            state.elapsed += by;
            let now = state.elapsed;

            let mut due: Vec<(Duration, u64, ScheduledTick)> = Vec::new();
            state.pending.retain(|entry| {
                if entry.0 <= now {
                    due.push(*entry);
                    false
                } else {
                    true
                }
            });
            due.sort_by_key(|(at, seq, _)| (*at, *seq));
            due.into_iter().map(|(_, _, tick)| tick.id).collect()
        }

        /// Ticks scheduled and not yet due or cancelled
        pub fn pending(&self) -> Vec<ScheduledTick> {
            let state = self.state.lock().unwrap();
            state.pending.iter().map(|(_, _, tick)| *tick).collect()
        }

        pub fn pending_count(&self) -> usize {
            self.state.lock().unwrap().pending.len()
        }

        /// Highest number of simultaneously pending ticks ever observed
        pub fn max_pending(&self) -> usize {
            self.state.lock().unwrap().max_pending
        }

        /// Every tick ever scheduled, in post order
        pub fn history(&self) -> Vec<ScheduledTick> {
            self.state.lock().unwrap().history.clone()
        }

        pub fn cancelled(&self) -> Vec<TickId> {
            self.state.lock().unwrap().cancelled.clone()
        }

        /// Time left until the earliest pending tick is due
        pub fn next_due_in(&self) -> Option<Duration> {
            let state = self.state.lock().unwrap();
            state
                .pending
                .iter()
                .map(|(at, _, _)| at.saturating_sub(state.elapsed))
                .min()
        }
    }

    impl Timer for ManualTimer {
        fn schedule(&self, tick: ScheduledTick) -> Box<dyn TimerHandle> {
            let mut state = self.state.lock().unwrap();
            let due = state.elapsed + tick.delay;
            let seq = state.posted;
            state.posted += 1;
            state.pending.push((due, seq, tick));
            state.history.push(tick);
            state.max_pending = state.max_pending.max(state.pending.len());

            Box::new(ManualHandle {
                id: tick.id,
                state: Arc::clone(&self.state),
            })
        }
    }

    struct ManualHandle {
        id: TickId,
        state: Arc<Mutex<ManualTimerState>>,
    }

    impl TimerHandle for ManualHandle {
        fn id(&self) -> TickId {
            self.id
        }

        fn cancel(self: Box<Self>) {
            let mut state = self.state.lock().unwrap();
            let before = state.pending.len();
            state.pending.retain(|(_, _, tick)| tick.id != self.id);
            if state.pending.len() != before {
                state.cancelled.push(self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::ManualTimer;
    use super::*;

    #[test]
    fn test_manual_timer_delivers_in_due_order() {
        let timer = ManualTimer::new();
        timer.schedule(ScheduledTick {
            id: TickId::new(1),
            delay: Duration::from_secs(10),
        });
        timer.schedule(ScheduledTick {
            id: TickId::new(2),
            delay: Duration::from_secs(5),
        });

        assert_eq!(timer.next_due_in(), Some(Duration::from_secs(5)));
        assert!(timer.advance(Duration::from_secs(4)).is_empty());
        assert_eq!(timer.advance(Duration::from_secs(10)), vec![TickId::new(2), TickId::new(1)]);
        assert_eq!(timer.max_pending(), 2);
    }

    #[test]
    fn test_cancelled_tick_never_comes_due() {
        let timer = ManualTimer::new();
        let handle = timer.schedule(ScheduledTick {
            id: TickId::new(7),
            delay: Duration::from_secs(1),
        });
        assert_eq!(handle.id(), TickId::new(7));
        handle.cancel();

        assert!(timer.advance(Duration::from_secs(60)).is_empty());
        assert_eq!(timer.cancelled(), vec![TickId::new(7)]);
        assert_eq!(timer.pending_count(), 0);
    }
}
