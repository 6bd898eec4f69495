//! Minute alignment scenarios
//!
//! Drives the ticker with a manual clock and a virtual-time timer so every
//! scheduling decision can be inspected:
//! - on-boundary start fires immediately, then every 60s
//! - off-boundary start waits (60 - s) seconds without firing
//! - stop is idempotent and leaves nothing pending
//! - never more than one pending tick
//! - pause/resume re-synchronizes from the resume-time clock
//! - a boundary fires at most once, even across restarts in its second

use minute_core::application::MinuteTicker;
use minute_core::domain::{TickerState, TimeSample, MINUTE_NOTIFICATION_ID};
use minute_core::port::clock::mocks::ManualClock;
use minute_core::port::notification_sink::mocks::RecordingSink;
use minute_core::port::timer::mocks::ManualTimer;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    clock: ManualClock,
    timer: ManualTimer,
    sink: RecordingSink,
    ticker: MinuteTicker,
}

impl Harness {
    fn at(hour: u32, minute: u32, second: u32) -> Self {
        let clock = ManualClock::new(TimeSample::new(hour, minute, second).unwrap());
        let timer = ManualTimer::new();
        let sink = RecordingSink::new();
        let ticker = MinuteTicker::new(
            Arc::new(clock.clone()),
            Arc::new(sink.clone()),
            Arc::new(timer.clone()),
        );
        Self {
            clock,
            timer,
            sink,
            ticker,
        }
    }

    /// Move wall clock and timer together one second at a time, feeding due ticks
    async fn advance(&mut self, secs: u32) {
        for _ in 0..secs {
            self.clock.advance_secs(1);
            for id in self.timer.advance(Duration::from_secs(1)) {
                self.ticker.on_tick(id).await;
            }
            assert!(self.timer.pending_count() <= 1);
        }
    }
}

#[tokio::test]
async fn test_start_on_boundary_fires_then_waits_a_minute() {
    let mut h = Harness::at(14, 30, 0);

    h.ticker.start().await;

    // Exactly one notification before the first reschedule
    assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 14:30"]);
    assert_eq!(h.timer.history().len(), 1);
    assert_eq!(h.timer.history()[0].delay, Duration::from_millis(60_000));

    h.advance(59).await;
    assert_eq!(h.sink.delivery_count(), 1);

    h.advance(1).await;
    assert_eq!(
        h.sink.delivered_bodies(),
        vec!["It's exactly 14:30", "It's exactly 14:31"]
    );
}

#[tokio::test]
async fn test_off_boundary_start_never_fires_early() {
    for second in 1..=59 {
        let mut h = Harness::at(7, 12, second);
        h.ticker.start().await;

        let wait = 60 - second;
        assert_eq!(
            h.timer.next_due_in(),
            Some(Duration::from_millis(u64::from(wait) * 1000)),
            "start at second {}",
            second
        );

        h.advance(wait - 1).await;
        assert_eq!(h.sink.delivery_count(), 0, "early fire at second {}", second);

        // The continuation lands on second 0 and takes the firing branch
        h.advance(1).await;
        assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 7:13"]);
        assert_eq!(h.timer.next_due_in(), Some(Duration::from_secs(60)));
    }
}

#[tokio::test]
async fn test_start_at_45_seconds() {
    let mut h = Harness::at(9, 59, 45);

    h.ticker.start().await;
    assert_eq!(h.sink.delivery_count(), 0);
    assert_eq!(h.timer.history()[0].delay, Duration::from_millis(15_000));

    h.advance(15).await;
    assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 10:00"]);
}

#[tokio::test]
async fn test_stop_twice_and_never_started() {
    let mut h = Harness::at(0, 0, 10);

    h.ticker.stop();
    assert_eq!(h.timer.pending_count(), 0);

    h.ticker.start().await;
    assert_eq!(h.timer.pending_count(), 1);

    h.ticker.stop();
    h.ticker.stop();
    assert_eq!(h.ticker.state(), TickerState::Paused);
    assert_eq!(h.timer.pending_count(), 0);

    h.advance(120).await;
    assert_eq!(h.sink.delivery_count(), 0);
}

#[tokio::test]
async fn test_pause_then_resume_before_boundary() {
    let mut h = Harness::at(16, 20, 45);

    h.ticker.start().await;
    let first = h.ticker.pending_tick().unwrap();

    h.advance(5).await;
    h.ticker.stop();
    assert_eq!(h.timer.cancelled(), vec![first]);

    h.advance(2).await;
    h.ticker.start().await;
    // Resumed at 16:20:52
    assert_eq!(h.timer.next_due_in(), Some(Duration::from_secs(8)));

    h.advance(8).await;
    assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 16:21"]);

    // Stale delivery of the cancelled tick changes nothing
    assert!(!h.ticker.on_tick(first).await);
    assert_eq!(h.sink.delivery_count(), 1);
    assert_eq!(h.timer.max_pending(), 1);
}

#[tokio::test]
async fn test_ten_minutes_with_interruptions_keep_one_pending() {
    let mut h = Harness::at(11, 0, 30);

    h.ticker.start().await;
    h.advance(150).await; // 11:03:00
    h.ticker.stop();
    h.advance(45).await;
    h.ticker.start().await;
    h.ticker.start().await;
    h.advance(400).await;

    assert_eq!(h.timer.max_pending(), 1);
    assert_eq!(h.timer.pending_count(), 1);

    let bodies = h.sink.delivered_bodies();
    assert_eq!(
        bodies,
        vec![
            "It's exactly 11:01",
            "It's exactly 11:02",
            "It's exactly 11:03",
            "It's exactly 11:04",
            "It's exactly 11:05",
            "It's exactly 11:06",
            "It's exactly 11:07",
            "It's exactly 11:08",
            "It's exactly 11:09",
            "It's exactly 11:10",
        ]
    );
    // Every delivery went to the same notification slot
    assert!(h
        .sink
        .delivered()
        .iter()
        .all(|n| n.id == MINUTE_NOTIFICATION_ID));
}

#[tokio::test]
async fn test_midnight_rollover() {
    let mut h = Harness::at(23, 59, 30);

    h.ticker.start().await;
    h.advance(30).await;

    assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 0:00"]);
}

#[tokio::test]
async fn test_failed_delivery_does_not_break_cadence() {
    let mut h = Harness::at(12, 0, 0);
    h.sink.set_failing(true);

    h.ticker.start().await;
    h.advance(60).await;
    h.sink.set_failing(false);
    h.advance(60).await;

    let stats = h.ticker.stats();
    assert_eq!(stats.delivery_failures, 2);
    assert_eq!(stats.delivered, 1);
    assert_eq!(h.sink.delivery_count(), 3);
}

#[tokio::test]
async fn test_pause_and_resume_within_boundary_second_fires_once() {
    let mut h = Harness::at(10, 0, 0);

    h.ticker.start().await;
    h.ticker.stop();
    h.ticker.start().await;
    h.ticker.start().await;
    assert_eq!(h.sink.delivered_bodies(), vec!["It's exactly 10:00"]);
    assert_eq!(h.ticker.state(), TickerState::Active);

    h.advance(60).await;
    assert_eq!(
        h.sink.delivered_bodies(),
        vec!["It's exactly 10:00", "It's exactly 10:01"]
    );
    assert_eq!(h.ticker.stats().repeated_boundaries, 2);
    assert_eq!(h.timer.max_pending(), 1);
}
