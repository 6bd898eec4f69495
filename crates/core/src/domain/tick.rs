// Tick Domain Model
// Alignment decision and ticker lifecycle state

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::error::{DomainError, Result};
use crate::domain::TimeSample;

/// One full minute between on-boundary ticks
pub const MINUTE: Duration = Duration::from_secs(60);

/// Identifier of one scheduled tick (monotonic per ticker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickId(u64);

impl TickId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Next id in sequence
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for TickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tick-{}", self.0)
    }
}

/// What a tick does with the time it just read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDecision {
    /// Deliver a notification now
    pub fire: bool,
    /// Delay before the next tick
    pub next_delay: Duration,
}

impl TickDecision {
    /// Fire only when exactly on a minute boundary, then wait a full minute;
    /// otherwise wait until the next boundary without firing.
    pub fn for_sample(sample: &TimeSample) -> Self {
        if sample.is_on_boundary() {
            Self {
                fire: true,
                next_delay: MINUTE,
            }
        } else {
            Self {
                fire: false,
                next_delay: Duration::from_secs(u64::from(sample.seconds_to_next_boundary())),
            }
        }
    }
}

/// Ticker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TickerState {
    Paused,
    Active,
}

impl TickerState {
    /// Paused -> Active
    pub fn activate(self) -> Result<Self> {
        match self {
            TickerState::Paused => Ok(TickerState::Active),
            TickerState::Active => Err(DomainError::InvalidStateTransition {
                from: self.to_string(),
                to: TickerState::Active.to_string(),
            }),
        }
    }

    /// Active -> Paused
    pub fn suspend(self) -> Result<Self> {
        match self {
            TickerState::Active => Ok(TickerState::Paused),
            TickerState::Paused => Err(DomainError::InvalidStateTransition {
                from: self.to_string(),
                to: TickerState::Paused.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TickerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickerState::Paused => write!(f, "PAUSED"),
            TickerState::Active => write!(f, "ACTIVE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_boundary_fires_and_waits_full_minute() {
        let decision = TickDecision::for_sample(&TimeSample::new(12, 30, 0).unwrap());
        assert!(decision.fire);
        assert_eq!(decision.next_delay, Duration::from_millis(60_000));
    }

    #[test]
    fn test_off_boundary_waits_without_firing() {
        for second in 1..=59 {
            let sample = TimeSample::new(12, 30, second).unwrap();
            let decision = TickDecision::for_sample(&sample);
            assert!(!decision.fire, "second {} must not fire", second);
            assert_eq!(
                decision.next_delay,
                Duration::from_millis(u64::from(60 - second) * 1000)
            );
            // The continuation lands exactly on the boundary
            let landed = sample.plus_seconds(decision.next_delay.as_secs() as u32);
            assert!(landed.is_on_boundary());
        }
    }

    #[test]
    fn test_state_transitions() {
        assert_eq!(TickerState::Paused.activate(), Ok(TickerState::Active));
        assert_eq!(TickerState::Active.suspend(), Ok(TickerState::Paused));
        assert!(TickerState::Active.activate().is_err());
        assert!(TickerState::Paused.suspend().is_err());
    }

    #[test]
    fn test_tick_id_sequence() {
        let first = TickId::new(1);
        assert_eq!(first.next(), TickId::new(2));
        assert_eq!(first.to_string(), "tick-1");
    }
}
