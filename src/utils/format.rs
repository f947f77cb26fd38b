//! Formatting utilities for durations and byte sizes.

/// Binary size units, one per power of 1024.
const BYTE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Round a duration in seconds to whole seconds; negative or non-finite
/// input counts as zero.
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    }
}

/// Format a duration in seconds as `MM:SS` (e.g., "03:07").
///
/// Minutes are not wrapped into hours, so long durations read "125:00".
pub fn format_minutes(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a duration in seconds as `HH:MM:SS` (e.g., "01:02:03").
pub fn format_hours(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

/// Format a byte count with binary units (e.g., "1.5 KB", "12 MB").
///
/// Shows at most two decimals and drops trailing zeros.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}
