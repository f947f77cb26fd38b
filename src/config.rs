//! Library configuration.
//!
//! Centralizes all configuration constants used throughout the crate.
//! Per-call settings (backend entry point, auth key) live on
//! [`BackendClient`](crate::utils::BackendClient) instead.

// =============================================================================
// Event Configuration
// =============================================================================

/// Event-wait timeouts below this many milliseconds disable the timer
/// entirely; the wait then only ends when the event fires.
pub const EVENT_TIMEOUT_THRESHOLD_MS: u32 = 100;

// =============================================================================
// Backend Configuration
// =============================================================================

/// Backend RPC form field names and fixed values.
pub mod backend {
    /// Form field carrying the authentication key.
    pub const FIELD_AUTH_KEY: &str = "authKey";
    /// Form field carrying the controller name.
    pub const FIELD_CONTROLLER: &str = "controller";
    /// Form field carrying the function name.
    pub const FIELD_FUNCTION: &str = "function";
    /// Form field carrying the call-mode marker.
    pub const FIELD_METHOD: &str = "method";
    /// Form field carrying the JSON-encoded parameters.
    pub const FIELD_PARAMETERS: &str = "parameters";
    /// Call-mode marker sent with every request.
    pub const CALL_METHOD: &str = "call";
    /// Status reported when the response body is not the expected JSON.
    pub const PARSE_FAILURE_STATUS: i64 = 666;
    /// Status reported when the request never produced a response.
    pub const TRANSPORT_FAILURE_STATUS: i64 = 0;
    /// Only this transport status is considered a delivered call.
    pub const SUCCESS_HTTP_STATUS: u16 = 200;
}

// =============================================================================
// Timer Configuration
// =============================================================================

/// Delay used by `wait` when no positive duration is given.
pub const DEFAULT_WAIT_MS: u32 = 1000;

// =============================================================================
// Codec Configuration
// =============================================================================

/// Separator between hex units of the XOR codec.
pub const XOR_SEPARATOR: &str = "|";

// =============================================================================
// DOM Configuration
// =============================================================================

/// Image shown in place of one that failed to load.
pub const IMAGE_NOT_FOUND_SRC: &str = "Media/Images/ImageNotFound.jpeg";

/// On-page log settings.
pub mod log {
    /// Maximum number of entries kept in a log element.
    pub const MAX_ENTRIES: u32 = 40;
    /// Text used when a log call carries no message.
    pub const EMPTY_MESSAGE: &str = "No log message given";
    /// Foreground color for highlighted levels.
    pub const HIGHLIGHT_TEXT_COLOR: &str = "white";
    /// Background color of warning entries.
    pub const WARNING_BACKGROUND: &str = "orange";
    /// Background color of error entries.
    pub const ERROR_BACKGROUND: &str = "red";
}
