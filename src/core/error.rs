//! Error types for the crate.
//!
//! One enum per concern:
//!
//! - [`FetchError`] - timed fetch and transport failures
//! - [`EventError`] - event subscription and event-wait timeouts
//! - [`CodecError`] - XOR codec and binary/hex conversion input errors
//! - [`DomError`] - page manipulation failures (on-page log, image fallback)

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Network/fetch-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to build the request or its abort controller
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// The transport rejected the request (CORS, DNS, offline, abort...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The fetch promise resolved to something other than a `Response`
    #[error("Invalid response object")]
    InvalidResponse,
    /// The timer fired before the request settled
    #[error("Request timed out ({timeout_ms} ms)")]
    Timeout { timeout_ms: u32 },
}

/// Event subscription errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The emitter refused the listener
    #[error("Failed to listen for event {event}: {reason}")]
    ListenerRegistrationFailed { event: String, reason: String },
    /// The emitter dropped the listener before the event fired
    #[error("Listener for event {event} was dropped by the emitter")]
    ListenerDropped { event: String },
    /// The timer fired before the event
    #[error("Timeout waiting for event: {event}")]
    Timeout { event: String },
}

/// Input errors of the string codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("XOR mask must not be empty")]
    EmptyMask,
    #[error("invalid hex unit '{0}'")]
    InvalidHex(String),
    #[error("invalid binary digit '{0}'")]
    InvalidBinaryDigit(char),
}

/// Page manipulation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Browser window or document not available
    #[error("Browser document not available")]
    NoDocument,
    /// The event did not come from an `<img>` element
    #[error("Event target is not an image element")]
    NotAnImage,
    /// A DOM call threw
    #[error("DOM operation failed: {0}")]
    OperationFailed(String),
}

/// Best-effort text for a thrown JavaScript value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
