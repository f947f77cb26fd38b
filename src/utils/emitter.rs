//! Named-event emitters.
//!
//! [`EventEmitter`] is the add/remove-listener capability event waits are
//! built on. It is implemented for DOM [`EventTarget`]s and for
//! [`LocalEmitter`], an in-process emitter for events that never touch the
//! page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Event, EventTarget};

use crate::core::error::{EventError, js_error_message};

/// Callback invoked with an event's payload.
pub type Callback<P> = Box<dyn FnMut(P)>;

/// Anything that can register and unregister listeners for named events.
pub trait EventEmitter {
    /// Data delivered with each occurrence.
    type Payload: 'static;
    /// Handle identifying a registered listener.
    type Listener;

    /// Register `callback` for every occurrence of `event`.
    fn add_listener(
        &self,
        event: &str,
        callback: Callback<Self::Payload>,
    ) -> Result<Self::Listener, EventError>;

    /// Unregister a listener returned by [`add_listener`](Self::add_listener).
    fn remove_listener(&self, event: &str, listener: &Self::Listener);
}

// =============================================================================
// DOM Event Targets
// =============================================================================

impl EventEmitter for EventTarget {
    type Payload = Event;
    type Listener = Closure<dyn FnMut(Event)>;

    fn add_listener(
        &self,
        event: &str,
        callback: Callback<Event>,
    ) -> Result<Self::Listener, EventError> {
        let closure = Closure::wrap(callback);
        self.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| EventError::ListenerRegistrationFailed {
                event: event.to_string(),
                reason: js_error_message(&e),
            })?;
        Ok(closure)
    }

    fn remove_listener(&self, event: &str, listener: &Self::Listener) {
        let _ = self.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
    }
}

// =============================================================================
// In-Process Emitter
// =============================================================================

/// Identifier of a listener registered on a [`LocalEmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration<P> {
    id: ListenerId,
    event: String,
    callback: Rc<RefCell<Callback<P>>>,
}

/// Single-threaded emitter delivering cloned payloads to named listeners.
///
/// Listeners may add or remove listeners (including themselves) while being
/// notified; changes apply from the next [`emit`](Self::emit). A listener may
/// also emit; the nested delivery skips listeners that are still running.
pub struct LocalEmitter<P> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Registration<P>>>,
}

impl<P> Default for LocalEmitter<P> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<P> std::fmt::Debug for LocalEmitter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl<P: Clone + 'static> LocalEmitter<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` to every listener of `event`.
    ///
    /// Returns the number of listeners notified. A listener already running
    /// further up the stack is not called again and not counted.
    pub fn emit(&self, event: &str, payload: P) -> usize {
        let callbacks: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|registration| registration.event == event)
            .map(|registration| Rc::clone(&registration.callback))
            .collect();

        let mut notified = 0;
        for callback in &callbacks {
            // Busy while it is running an outer emit
            let Ok(mut callback) = callback.try_borrow_mut() else {
                continue;
            };
            (*callback)(payload.clone());
            notified += 1;
        }
        notified
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|registration| registration.event == event)
            .count()
    }
}

impl<P: Clone + 'static> EventEmitter for LocalEmitter<P> {
    type Payload = P;
    type Listener = ListenerId;

    fn add_listener(&self, event: &str, callback: Callback<P>) -> Result<ListenerId, EventError> {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Registration {
            id,
            event: event.to_string(),
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(id)
    }

    fn remove_listener(&self, _event: &str, listener: &ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|registration| registration.id != *listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_matching_listeners() {
        let emitter = LocalEmitter::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        emitter
            .add_listener("tick", Box::new(move |n| sink.borrow_mut().push(n)))
            .unwrap();
        emitter.add_listener("other", Box::new(|_| panic!("wrong event"))).unwrap();

        assert_eq!(emitter.emit("tick", 1), 1);
        assert_eq!(emitter.emit("tick", 2), 1);
        assert_eq!(emitter.emit("nobody", 3), 0);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_remove_listener() {
        let emitter = LocalEmitter::<()>::new();
        let first = emitter.add_listener("ready", Box::new(|_| {})).unwrap();
        emitter.add_listener("ready", Box::new(|_| {})).unwrap();
        assert_eq!(emitter.listener_count("ready"), 2);

        emitter.remove_listener("ready", &first);
        assert_eq!(emitter.listener_count("ready"), 1);
        assert_eq!(emitter.emit("ready", ()), 1);
    }

    #[test]
    fn test_listener_can_register_during_emit() {
        let emitter = Rc::new(LocalEmitter::<()>::new());

        let inner = Rc::clone(&emitter);
        emitter
            .add_listener(
                "ready",
                Box::new(move |_| {
                    inner.add_listener("later", Box::new(|_| {})).unwrap();
                }),
            )
            .unwrap();

        emitter.emit("ready", ());
        assert_eq!(emitter.listener_count("later"), 1);
    }

    #[test]
    fn test_listener_can_emit_during_emit() {
        let emitter = Rc::new(LocalEmitter::<u32>::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let nested = Rc::new(Cell::new(0));

        let inner = Rc::clone(&emitter);
        let sink = Rc::clone(&seen);
        let nested_count = Rc::clone(&nested);
        emitter
            .add_listener(
                "tick",
                Box::new(move |n| {
                    sink.borrow_mut().push(n);
                    if n > 0 {
                        nested_count.set(inner.emit("tick", n - 1));
                    }
                }),
            )
            .unwrap();

        let other = Rc::clone(&seen);
        emitter
            .add_listener("tick", Box::new(move |n| other.borrow_mut().push(n + 100)))
            .unwrap();

        assert_eq!(emitter.emit("tick", 2), 2);
        // The nested emit reaches only the listener that is not running
        assert_eq!(nested.get(), 1);
        assert_eq!(*seen.borrow(), vec![2, 101, 102]);
    }
}
