//! On-page log rendering.
//!
//! Appends timestamped lines to a container element, keeping only the most
//! recent [`MAX_ENTRIES`] of them.

use std::fmt;

use web_sys::HtmlElement;
use wasm_bindgen::JsCast;

use crate::config::log::{
    EMPTY_MESSAGE, ERROR_BACKGROUND, HIGHLIGHT_TEXT_COLOR, MAX_ENTRIES, WARNING_BACKGROUND,
};
use crate::core::error::{DomError, js_error_message};
use crate::utils::dom;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parse the level names accepted from JavaScript; anything unknown is
    /// plain info.
    pub fn from_name(name: &str) -> Self {
        match name {
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Background color of the entry, if highlighted.
    fn background(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Warning => Some(WARNING_BACKGROUND),
            Self::Error => Some(ERROR_BACKGROUND),
        }
    }
}

/// Local wall-clock time of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl Timestamp {
    /// Current local time from the browser clock.
    pub fn now() -> Self {
        let now = js_sys::Date::new_0();
        Self {
            hours: now.get_hours(),
            minutes: now.get_minutes(),
            seconds: now.get_seconds(),
            millis: now.get_milliseconds(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:02}:{:02}:{:02}:{}]",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// Text of a log line, e.g. `[09:05:01:7]: started`.
pub fn format_log_line(time: Timestamp, message: &str) -> String {
    let message = if message.is_empty() {
        EMPTY_MESSAGE
    } else {
        message
    };
    format!("{}: {}", time, message)
}

/// Append `message` to `output` as a new log entry.
///
/// The message is inserted as text, never as markup. When the container
/// already holds the maximum number of entries the oldest is removed first.
pub fn log_to(output: &HtmlElement, message: &str, level: LogLevel) -> Result<(), DomError> {
    let document = dom::document().ok_or(DomError::NoDocument)?;
    let entry = document
        .create_element("div")
        .map_err(|e| DomError::OperationFailed(js_error_message(&e)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::OperationFailed("created element is not an HtmlElement".into()))?;

    if let Some(background) = level.background() {
        let style = entry.style();
        style
            .set_property("background-color", background)
            .and_then(|_| style.set_property("color", HIGHLIGHT_TEXT_COLOR))
            .map_err(|e| DomError::OperationFailed(js_error_message(&e)))?;
    }

    entry.set_text_content(Some(&format_log_line(Timestamp::now(), message)));

    if output.children().length() >= MAX_ENTRIES
        && let Some(oldest) = output.first_element_child()
    {
        oldest.remove();
    }

    output
        .append_child(&entry)
        .map_err(|e| DomError::OperationFailed(js_error_message(&e)))?;
    Ok(())
}
