//! Timeout races on a paused tokio clock.

mod common;

use std::cell::Cell;
use std::future::pending;
use std::rc::Rc;
use std::time::Duration;

use common::{sleep_ms, DropFlag, TrackedTimer};
use pagekit::utils::{race_or_abort, race_with_timeout, wait_with, RaceResult, Timer};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn operation_finishing_first_wins_and_clears_timer() {
    let timer = TrackedTimer::default();
    let aborted = Cell::new(false);

    let result = race_or_abort(
        async {
            sleep_ms(10).await;
            "done"
        },
        timer.sleep(100),
        || aborted.set(true),
    )
    .await;

    assert_eq!(result, RaceResult::Completed("done"));
    assert!(!aborted.get());
    assert_eq!(timer.live(), 0);

    sleep_ms(500).await;
    assert_eq!(timer.fired(), 0);
}

#[tokio::test(start_paused = true)]
async fn timer_firing_first_aborts_and_drops_operation() {
    let timer = TrackedTimer::default();
    let aborted = Cell::new(false);
    let dropped = Rc::new(Cell::new(false));

    let flag = DropFlag(Rc::clone(&dropped));
    let result = race_or_abort(
        async move {
            let _flag = flag;
            sleep_ms(500).await;
            "late"
        },
        timer.sleep(100),
        || aborted.set(true),
    )
    .await;

    assert_eq!(result, RaceResult::TimedOut);
    assert!(aborted.get());
    assert!(dropped.get());
    assert_eq!(timer.fired(), 1);
    assert_eq!(timer.live(), 0);
}

#[tokio::test(start_paused = true)]
async fn settlement_follows_durations() {
    for (operation_ms, timeout_ms, completes) in [(10, 100, true), (99, 100, true), (101, 100, false), (5000, 250, false)] {
        let timer = TrackedTimer::default();
        let result = race_with_timeout(sleep_ms(operation_ms), timer.sleep(timeout_ms)).await;

        assert_eq!(
            result == RaceResult::Completed(()),
            completes,
            "operation {}ms vs timeout {}ms",
            operation_ms,
            timeout_ms
        );
        assert_eq!(timer.live(), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn zero_timeout_is_immediate() {
    let timer = TrackedTimer::default();
    let aborted = Cell::new(false);

    let start = Instant::now();
    let result = race_or_abort(pending::<()>(), timer.sleep(0), || aborted.set(true)).await;

    assert_eq!(result, RaceResult::TimedOut);
    assert!(aborted.get());
    assert!(start.elapsed() < Duration::from_millis(1));
}

#[tokio::test(start_paused = true)]
async fn ready_operation_beats_expired_timer() {
    let timer = TrackedTimer::default();
    let result = race_with_timeout(async { 7 }, timer.sleep(0)).await;

    assert_eq!(result, RaceResult::Completed(7));
    assert_eq!(timer.fired(), 0);
}

#[tokio::test(start_paused = true)]
async fn wait_uses_default_for_zero() {
    let timer = TrackedTimer::default();

    let start = Instant::now();
    wait_with(&timer, 0).await;
    assert!(start.elapsed() >= Duration::from_millis(1000));

    let start = Instant::now();
    wait_with(&timer, 250).await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(250));
    assert!(elapsed < Duration::from_millis(1000));
    assert_eq!(timer.fired(), 2);
}
