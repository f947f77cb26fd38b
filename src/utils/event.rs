//! Waiting for a single event occurrence.
//!
//! [`OnceListener`] is a one-shot subscription: it delivers the first
//! occurrence of an event and unregisters itself when it completes or is
//! dropped. [`wait_for_event_with`] races it against an optional timer.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use web_sys::{Event, EventTarget};

use crate::config::EVENT_TIMEOUT_THRESHOLD_MS;
use crate::core::error::EventError;
use crate::utils::emitter::EventEmitter;
use crate::utils::timer::{race_with_timeout, BrowserTimer, RaceResult, Timer};

/// Future resolving with the first occurrence of an event.
///
/// Later occurrences are ignored. The listener is removed from the emitter
/// as soon as the future completes, or when it is dropped unresolved.
pub struct OnceListener<'a, E: EventEmitter> {
    emitter: &'a E,
    event: String,
    listener: Option<E::Listener>,
    receiver: oneshot::Receiver<E::Payload>,
}

// No field is ever pinned.
impl<E: EventEmitter> Unpin for OnceListener<'_, E> {}

impl<'a, E: EventEmitter> OnceListener<'a, E> {
    /// Subscribe to the next occurrence of `event` on `emitter`.
    pub fn register(emitter: &'a E, event: &str) -> Result<Self, EventError> {
        let (sender, receiver) = oneshot::channel();
        let mut sender = Some(sender);
        let listener = emitter.add_listener(
            event,
            Box::new(move |payload| {
                if let Some(sender) = sender.take() {
                    let _ = sender.send(payload);
                }
            }),
        )?;

        Ok(Self {
            emitter,
            event: event.to_string(),
            listener: Some(listener),
            receiver,
        })
    }

    /// Name of the awaited event.
    pub fn event(&self) -> &str {
        &self.event
    }

    fn detach(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.emitter.remove_listener(&self.event, &listener);
        }
    }
}

impl<E: EventEmitter> Future for OnceListener<'_, E> {
    type Output = Result<E::Payload, EventError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let received = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(received) => received,
        };

        this.detach();
        Poll::Ready(received.map_err(|_| EventError::ListenerDropped {
            event: this.event.clone(),
        }))
    }
}

impl<E: EventEmitter> Drop for OnceListener<'_, E> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Wait for the first `event` on a DOM target.
///
/// See [`wait_for_event_with`] for the timeout rules.
pub async fn wait_for_event(
    target: &EventTarget,
    event: &str,
    timeout_ms: u32,
) -> Result<Event, EventError> {
    wait_for_event_with(&BrowserTimer, target, event, timeout_ms).await
}

/// Wait for the first `event` on `emitter`, timing out on `timer`.
///
/// A `timeout_ms` of at least 100 starts a timer; if it fires first the
/// listener is removed and the wait fails with [`EventError::Timeout`].
/// Shorter timeouts, including 0, create no timer and wait indefinitely.
pub async fn wait_for_event_with<E, T>(
    timer: &T,
    emitter: &E,
    event: &str,
    timeout_ms: u32,
) -> Result<E::Payload, EventError>
where
    E: EventEmitter,
    T: Timer,
{
    let listener = OnceListener::register(emitter, event)?;

    if timeout_ms < EVENT_TIMEOUT_THRESHOLD_MS {
        return listener.await;
    }

    match race_with_timeout(listener, timer.sleep(timeout_ms)).await {
        RaceResult::Completed(result) => result,
        RaceResult::TimedOut => {
            tracing::debug!(event, timeout_ms, "event wait timed out");
            Err(EventError::Timeout {
                event: event.to_string(),
            })
        }
    }
}
