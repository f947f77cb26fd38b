//! Stateless helpers for browser front-ends.
//!
//! - [`utils`] - timed fetch, one-shot event waits, backend RPC, timers,
//!   formatting, and page helpers
//! - [`core`] - target-independent pieces: the backend [`Outcome`], string
//!   codecs, escaping, shuffling
//! - [`bindings`] - the same helpers exported to JavaScript
//!
//! Every helper takes its inputs explicitly and keeps no state between
//! calls. Timed operations clean up after themselves: whichever of the
//! operation and its timer loses the race is dropped, which clears the timer
//! or aborts the request.

pub mod bindings;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::core::error::{CodecError, DomError, EventError, FetchError};
pub use crate::core::{normalize_response, Failure, Outcome};
