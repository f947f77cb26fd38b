//! Timers and timeout races.
//!
//! [`race_with_timeout`] drives an operation and a timer side by side and
//! drops whichever loses, so a finished operation never leaves a live timer
//! behind. The timer source is abstracted by [`Timer`]: in the browser it is
//! [`BrowserTimer`] (`setTimeout`, cleared on drop); tests plug in their own.

use std::future::Future;
use std::pin::pin;

use futures_util::future::{select, Either};
use gloo_timers::future::TimeoutFuture;

use crate::config::DEFAULT_WAIT_MS;

/// Source of sleep futures.
///
/// Dropping a sleep before it completes must cancel the underlying timer.
pub trait Timer {
    type Sleep: Future<Output = ()>;

    /// Future that completes after `ms` milliseconds.
    fn sleep(&self, ms: u32) -> Self::Sleep;
}

/// Browser `setTimeout` timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Sleep = TimeoutFuture;

    fn sleep(&self, ms: u32) -> TimeoutFuture {
        TimeoutFuture::new(ms)
    }
}

/// Result of racing an operation against a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceResult<T> {
    /// The operation settled before the timer fired.
    Completed(T),
    /// The timer fired first; the operation was dropped.
    TimedOut,
}

/// Race `operation` against `timeout`.
///
/// The operation is polled first, so one that is already complete wins even
/// against an expired timer. The loser is dropped before this returns.
pub async fn race_with_timeout<F, S>(operation: F, timeout: S) -> RaceResult<F::Output>
where
    F: Future,
    S: Future<Output = ()>,
{
    let operation = pin!(operation);
    let timeout = pin!(timeout);

    match select(operation, timeout).await {
        Either::Left((output, _timer)) => RaceResult::Completed(output),
        Either::Right(((), _operation)) => RaceResult::TimedOut,
    }
}

/// Race `operation` against `timeout`, running `abort` when the timer wins.
///
/// `abort` is how the caller cancels work that outlives the dropped future,
/// such as an in-flight browser request.
pub async fn race_or_abort<F, S, A>(operation: F, timeout: S, abort: A) -> RaceResult<F::Output>
where
    F: Future,
    S: Future<Output = ()>,
    A: FnOnce(),
{
    let result = race_with_timeout(operation, timeout).await;
    if matches!(result, RaceResult::TimedOut) {
        abort();
    }
    result
}

/// Sleep for `ms` milliseconds in the browser; `0` sleeps for the default
/// of one second.
pub async fn wait(ms: u32) {
    wait_with(&BrowserTimer, ms).await
}

/// Sleep on the given timer; `0` sleeps for the default of one second.
pub async fn wait_with<T: Timer>(timer: &T, ms: u32) {
    let ms = if ms == 0 { DEFAULT_WAIT_MS } else { ms };
    timer.sleep(ms).await
}
