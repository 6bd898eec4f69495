// Clock Port (for testability)

use crate::domain::TimeSample;

/// Wall-clock interface (allows mocking in tests)
pub trait Clock: Send + Sync {
    /// Read the current local time
    fn now(&self) -> TimeSample;
}

/// Local wall clock (production)
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> TimeSample {
        TimeSample::from_timelike(&chrono::Local::now())
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Clock that only moves when told to
    #[derive(Clone)]
    pub struct ManualClock {
        sample: Arc<Mutex<TimeSample>>,
    }

    impl ManualClock {
        pub fn new(start: TimeSample) -> Self {
            Self {
                sample: Arc::new(Mutex::new(start)),
            }
        }

        pub fn advance_secs(&self, secs: u32) {
            let mut sample = self.sample.lock().unwrap();
            *sample = sample.plus_seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> TimeSample {
            *self.sample.lock().unwrap()
        }
    }
}
