//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use std::sync::LazyLock;

use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlImageElement, Window};

use crate::config::IMAGE_NOT_FOUND_SRC;
use crate::core::error::DomError;

/// Dotted IPv4 loopback address (127.0.0.0/8).
static IPV4_LOOPBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^127(?:\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}$")
        .expect("loopback pattern is valid")
});

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the page document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Check whether a hostname refers to the local machine.
///
/// Accepts `localhost`, the IPv6 loopback `[::1]`, and any dotted address
/// in 127.0.0.0/8.
pub fn is_localhost_host(hostname: &str) -> bool {
    hostname == "localhost" || hostname == "[::1]" || IPV4_LOOPBACK.is_match(hostname)
}

/// Check whether the current page is served from the local machine.
pub fn is_localhost() -> bool {
    window()
        .and_then(|w| w.location().hostname().ok())
        .is_some_and(|hostname| is_localhost_host(&hostname))
}

/// Replace a broken image with the fallback image.
///
/// Meant as the `error` handler of `<img>` elements.
pub fn on_image_not_found(event: &Event) -> Result<(), DomError> {
    let image = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
        .ok_or(DomError::NotAnImage)?;

    // Avoid an endless error loop if the fallback itself is missing
    if image.src().ends_with(IMAGE_NOT_FOUND_SRC) {
        return Ok(());
    }

    image.set_src(IMAGE_NOT_FOUND_SRC);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_hosts() {
        assert!(is_localhost_host("localhost"));
        assert!(is_localhost_host("[::1]"));
        assert!(!is_localhost_host("localhost.example.com"));
        assert!(!is_localhost_host("example.com"));
        assert!(!is_localhost_host(""));
    }

    #[test]
    fn test_ipv4_loopback() {
        assert!(is_localhost_host("127.0.0.1"));
        assert!(is_localhost_host("127.255.255.255"));
        assert!(is_localhost_host("127.1.02.3"));
        assert!(!is_localhost_host("127.0.0.256"));
        assert!(!is_localhost_host("127.0.0"));
        assert!(!is_localhost_host("128.0.0.1"));
        assert!(!is_localhost_host("10.0.0.1"));
    }
}
