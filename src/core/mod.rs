//! Target-independent helpers.
//!
//! This module provides:
//! - [`Outcome`] and [`normalize_response`] for backend replies
//! - [`codec`] string codecs (XOR, hashing, binary/hex)
//! - [`escape`] quote escaping
//! - [`data`] shuffling and deep copies

pub mod codec;
pub mod data;
pub mod error;
pub mod escape;
mod outcome;

pub use outcome::{normalize_response, Failure, Outcome};
