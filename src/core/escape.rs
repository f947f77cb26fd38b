//! Quote escaping for strings headed into scripts or HTML attributes.

/// Prefix every `"` and `'` with a backslash.
pub fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '"' || c == '\'' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Replace quotes with their HTML entities (`&apos;`, `&quot;`).
pub fn html_escape(value: &str) -> String {
    value.replace('\'', "&apos;").replace('"', "&quot;")
}

/// Turn `&apos;` and `&quot;` back into quotes.
pub fn html_unescape(value: &str) -> String {
    value.replace("&apos;", "'").replace("&quot;", "\"")
}
