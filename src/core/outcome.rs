//! Normalized result of a backend call.
//!
//! Every backend call, however it fails, ends in an [`Outcome`]: either the
//! application payload or a [`Failure`] carrying a message and a numeric
//! status. [`normalize_response`] turns a raw transport reply into one.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::config::backend::{PARSE_FAILURE_STATUS, SUCCESS_HTTP_STATUS, TRANSPORT_FAILURE_STATUS};

/// Two-shape result of a backend call.
///
/// Built once by the call and never mutated afterwards; there are no `&mut`
/// accessors. Serializes to `{ "isError": bool, "data": ... }`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call succeeded; `None` when the backend returned no data.
    Success(Option<Value>),
    /// The call failed somewhere between transport and application.
    Failure(Failure),
}

/// Failure half of an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    status: i64,
}

impl Failure {
    fn new(message: impl Into<String>, status: i64) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transport status, 666 for unparseable bodies, or the backend's code.
    pub fn status(&self) -> i64 {
        self.status
    }
}

impl Outcome {
    /// Failure for a request that never produced a response.
    pub fn transport_error(reason: &str) -> Self {
        Self::Failure(Failure::new(
            format!("HTTP call to backend entry point failed: {}", reason),
            TRANSPORT_FAILURE_STATUS,
        ))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Payload of a successful call.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => data.as_ref(),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        state.serialize_field("isError", &self.is_error())?;
        match self {
            Self::Success(data) => state.serialize_field("data", data)?,
            Self::Failure(failure) => state.serialize_field("data", failure)?,
        }
        state.end()
    }
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Failure", 2)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

// =============================================================================
// Response Normalization
// =============================================================================

/// Envelope every backend reply is wrapped in.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "RESPONSE_CODE")]
    response_code: Number,
    #[serde(rename = "RESPONSE", default)]
    response: Option<Reply>,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(rename = "STATUS_CODE")]
    status_code: Number,
    #[serde(rename = "DATA", default)]
    data: Option<Value>,
}

/// Whole-number value of a JSON code; `3` and `3.0` are the same code.
///
/// Fractional or out-of-range codes have no status to report.
fn whole_code(code: &Number) -> Option<i64> {
    if let Some(value) = code.as_i64() {
        return Some(value);
    }
    code.as_f64()
        .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .map(|value| value as i64)
}

/// Map a raw transport reply to an [`Outcome`].
///
/// Checks run in order and the first match wins: transport status, body
/// shape, `RESPONSE_CODE`, then `RESPONSE.STATUS_CODE`.
pub fn normalize_response(status: u16, status_text: &str, body: &str) -> Outcome {
    if status != SUCCESS_HTTP_STATUS {
        return Outcome::Failure(Failure::new(
            format!(
                "HTTP call to backend entry point failed: {} {}",
                status, status_text
            )
            .trim_end()
            .to_string(),
            i64::from(status),
        ));
    }

    let unparseable = || {
        Outcome::Failure(Failure::new(
            "Return data from the backend entry point could not be parsed as JSON",
            PARSE_FAILURE_STATUS,
        ))
    };

    let Ok(envelope) = serde_json::from_str::<Envelope>(body) else {
        return unparseable();
    };
    let Some(response_code) = whole_code(&envelope.response_code) else {
        return unparseable();
    };

    if response_code != 0 {
        return Outcome::Failure(Failure::new(
            "Backend entry point failed when acting on request data",
            response_code,
        ));
    }

    let Some(reply) = envelope.response else {
        return unparseable();
    };

    let Some(status_code) = whole_code(&reply.status_code) else {
        return unparseable();
    };

    if status_code != 0 {
        return Outcome::Failure(Failure::new(
            "Internal error beyond the backend entry point",
            status_code,
        ));
    }

    Outcome::Success(reply.data.filter(|data| !data.is_null()))
}
