//! Browser-facing utilities.
//!
//! Provides:
//! - [`fetch_with_timeout`] - Network fetching aborted after a timeout
//! - [`wait_for_event`], [`OnceListener`] - One-shot event subscriptions
//! - [`backend_call`], [`BackendClient`] - Backend RPC with normalized outcomes
//! - [`race_with_timeout`], [`wait`] - Timer races and sleeps
//! - [`format`] - Duration and byte-size formatting
//! - [`dom`], [`log`] - Page helpers and the on-page log

mod backend;
pub mod dom;
pub mod emitter;
mod event;
mod fetch;
pub mod format;
pub mod log;
mod timer;

pub use backend::{backend_call, BackendClient, BackendRequest};
pub use emitter::{EventEmitter, ListenerId, LocalEmitter};
pub use event::{wait_for_event, wait_for_event_with, OnceListener};
pub use fetch::{fetch_with_timeout, fetch_with_timer};
pub use timer::{race_or_abort, race_with_timeout, wait, wait_with, BrowserTimer, RaceResult, Timer};
