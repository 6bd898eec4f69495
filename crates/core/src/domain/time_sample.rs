// Time Sample Domain Model
// A wall-clock reading taken fresh on every tick, never stored between ticks

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// Wall-clock reading (local time, 24h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSample {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeSample {
    /// Create a validated sample
    ///
    /// # Arguments
    /// * `hour` - 0..=23
    /// * `minute` - 0..=59
    /// * `second` - 0..=59 (leap seconds are folded into 59 by `from_timelike`)
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(DomainError::InvalidTimeSample {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Build a sample from any chrono time value
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            // chrono reports a leap second as nanosecond >= 1e9, never as second 60
            second: t.second().min(59),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// True when the seconds component is exactly 0
    pub fn is_on_boundary(&self) -> bool {
        self.second == 0
    }

    /// Seconds remaining until the next minute boundary (1..=60)
    pub fn seconds_to_next_boundary(&self) -> u32 {
        60 - self.second
    }

    /// Clock label shown in the notification body: `H:MM` (hour unpadded, 24h)
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.hour, self.minute)
    }

    /// Sample `secs` seconds later, wrapping at midnight
    pub fn plus_seconds(&self, secs: u32) -> Self {
        let total = (self.hour * 3600 + self.minute * 60 + self.second + secs) % 86_400;
        Self {
            hour: total / 3600,
            minute: (total % 3600) / 60,
            second: total % 60,
        }
    }
}

impl std::fmt::Display for TimeSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
