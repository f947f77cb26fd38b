//! Shared test fixtures.

#![allow(dead_code)]

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use pagekit::utils::Timer;

/// Timer backed by tokio's clock that records how its sleeps are used.
#[derive(Clone, Default)]
pub struct TrackedTimer {
    started: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
    fired: Rc<Cell<usize>>,
}

impl TrackedTimer {
    /// Sleeps created so far.
    pub fn started(&self) -> usize {
        self.started.get()
    }

    /// Sleeps created and not yet dropped.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Sleeps that ran to completion.
    pub fn fired(&self) -> usize {
        self.fired.get()
    }
}

pub struct TrackedSleep {
    sleep: Pin<Box<tokio::time::Sleep>>,
    live: Rc<Cell<usize>>,
    fired: Rc<Cell<usize>>,
}

impl Future for TrackedSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        match this.sleep.as_mut().poll(cx) {
            Poll::Ready(()) => {
                this.fired.set(this.fired.get() + 1);
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for TrackedSleep {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl Timer for TrackedTimer {
    type Sleep = TrackedSleep;

    fn sleep(&self, ms: u32) -> TrackedSleep {
        self.started.set(self.started.get() + 1);
        self.live.set(self.live.get() + 1);
        TrackedSleep {
            sleep: Box::pin(tokio::time::sleep(Duration::from_millis(u64::from(ms)))),
            live: Rc::clone(&self.live),
            fired: Rc::clone(&self.fired),
        }
    }
}

/// Sets its flag when dropped; used to observe that a losing future is
/// released.
pub struct DropFlag(pub Rc<Cell<bool>>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
