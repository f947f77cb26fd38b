//! JavaScript bindings.
//!
//! Exposes the helper set to page scripts under camelCase names. Errors
//! cross the boundary as `Error` objects; values handed back to JavaScript
//! that describe an outcome are deep-frozen.

use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use serde_json::{Map, Value};
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, RequestInit, Response};

use crate::core::codec;
use crate::core::data::shuffle;
use crate::core::escape;
use crate::utils::log::{log_to, LogLevel};
use crate::utils::{self, dom, format};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Recursively freeze an object graph. Already frozen objects are skipped,
/// which also stops at cycles.
fn deep_freeze(value: &JsValue) {
    if !value.is_object() {
        return;
    }
    let object: &Object = value.unchecked_ref();
    if Object::is_frozen(object) {
        return;
    }

    Object::freeze(object);
    for child in Object::values(object).iter() {
        deep_freeze(&child);
    }
}

// =============================================================================
// Networking
// =============================================================================

#[wasm_bindgen(js_name = fetchWithTimeout)]
pub async fn js_fetch_with_timeout(
    url: String,
    timeout_ms: u32,
    init: Option<RequestInit>,
) -> Result<Response, JsValue> {
    utils::fetch_with_timeout(&url, timeout_ms, init)
        .await
        .map_err(to_js_error)
}

#[wasm_bindgen(js_name = waitForEvent)]
pub async fn js_wait_for_event(
    target: EventTarget,
    event_name: String,
    timeout_ms: Option<u32>,
) -> Result<Event, JsValue> {
    utils::wait_for_event(&target, &event_name, timeout_ms.unwrap_or(0))
        .await
        .map_err(to_js_error)
}

/// Resolves to a frozen `{ isError, data }` object; rejects only when `data`
/// is not a plain object.
#[wasm_bindgen(js_name = backendCall)]
pub async fn js_backend_call(
    entry_point: String,
    auth_key: String,
    controller: String,
    function_name: String,
    data: JsValue,
) -> Result<JsValue, JsValue> {
    let data: Map<String, Value> = if data.is_undefined() || data.is_null() {
        Map::new()
    } else {
        serde_wasm_bindgen::from_value(data)?
    };

    let outcome = utils::backend_call(&entry_point, &auth_key, &controller, &function_name, &data).await;
    let value = outcome.serialize(&Serializer::json_compatible())?;
    deep_freeze(&value);
    Ok(value)
}

#[wasm_bindgen(js_name = wait)]
pub async fn js_wait(ms: Option<f64>) {
    let ms = ms
        .filter(|ms| ms.is_finite() && *ms > 0.0)
        .map_or(0, |ms| ms.min(f64::from(u32::MAX)) as u32);
    utils::wait(ms).await
}

// =============================================================================
// Codecs and Escaping
// =============================================================================

#[wasm_bindgen(js_name = xorEncode)]
pub fn js_xor_encode(raw: &str, mask: &str, separator: Option<String>) -> Result<String, JsValue> {
    let separator = separator.as_deref().unwrap_or(crate::config::XOR_SEPARATOR);
    codec::xor_encode_with(raw, mask, separator).map_err(to_js_error)
}

#[wasm_bindgen(js_name = xorDecode)]
pub fn js_xor_decode(encoded: &str, mask: &str, separator: Option<String>) -> Result<String, JsValue> {
    let separator = separator.as_deref().unwrap_or(crate::config::XOR_SEPARATOR);
    codec::xor_decode_with(encoded, mask, separator).map_err(to_js_error)
}

#[wasm_bindgen(js_name = hash)]
pub fn js_hash(input: &str) -> i32 {
    codec::string_hash(input)
}

#[wasm_bindgen(js_name = binaryToHex)]
pub fn js_binary_to_hex(bits: &str) -> Result<String, JsValue> {
    codec::binary_to_hex(bits).map_err(to_js_error)
}

#[wasm_bindgen(js_name = toBinaryString)]
pub fn js_to_binary_string(bytes: &[u8]) -> String {
    codec::to_binary_string(bytes)
}

#[wasm_bindgen(js_name = escapeString)]
pub fn js_escape_string(value: &str) -> String {
    escape::escape_quotes(value)
}

#[wasm_bindgen(js_name = htmlEscapeString)]
pub fn js_html_escape_string(value: &str) -> String {
    escape::html_escape(value)
}

#[wasm_bindgen(js_name = htmlUnescapeString)]
pub fn js_html_unescape_string(value: &str) -> String {
    escape::html_unescape(value)
}

// =============================================================================
// Formatting and Data
// =============================================================================

#[wasm_bindgen(js_name = readableTimeInMinutes)]
pub fn js_readable_time_in_minutes(seconds: f64) -> String {
    format::format_minutes(seconds)
}

#[wasm_bindgen(js_name = readableTimeInHours)]
pub fn js_readable_time_in_hours(seconds: f64) -> String {
    format::format_hours(seconds)
}

/// Negative and non-finite sizes format as zero bytes.
#[wasm_bindgen(js_name = readableBytes)]
pub fn js_readable_bytes(bytes: f64) -> String {
    format::format_bytes(bytes.max(0.0) as u64)
}

/// Shuffle an array in place. Frozen arrays are rejected.
#[wasm_bindgen(js_name = shuffleArray)]
pub fn js_shuffle_array(array: &Array) -> Result<(), JsValue> {
    if Object::is_frozen(array) {
        return Err(to_js_error("cannot shuffle a frozen array"));
    }

    let mut items: Vec<JsValue> = array.iter().collect();
    shuffle(&mut items);
    for (index, item) in items.into_iter().enumerate() {
        array.set(index as u32, item);
    }
    Ok(())
}

// =============================================================================
// Page Helpers
// =============================================================================

#[wasm_bindgen(js_name = isLocalhost)]
pub fn js_is_localhost() -> bool {
    dom::is_localhost()
}

#[wasm_bindgen(js_name = onImageNotFound)]
pub fn js_on_image_not_found(event: &Event) -> Result<(), JsValue> {
    dom::on_image_not_found(event).map_err(to_js_error)
}

/// Text for a numeric log message; `0` and `NaN` count as no message.
fn number_message(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        String::new()
    } else {
        n.to_string()
    }
}

/// Text to log for an arbitrary JavaScript value.
fn log_message(message: &JsValue) -> String {
    if let Some(text) = message.as_string() {
        return text;
    }
    if message.is_undefined() || message.is_null() {
        return String::new();
    }
    if let Some(flag) = message.as_bool() {
        return if flag { flag.to_string() } else { String::new() };
    }
    if !message.is_object() {
        return message.as_f64().map(number_message).unwrap_or_default();
    }

    if let Some(text) = Reflect::get(message, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        && !text.is_empty()
    {
        return text;
    }

    let constructor = String::from(message.unchecked_ref::<Object>().constructor().name());
    format!("WARNING: Object with no message attribute received ({})", constructor)
}

/// Append a line to an on-page log element. `level` is `"WARNING"`,
/// `"ERROR"`, or anything else for plain info.
#[wasm_bindgen(js_name = log)]
pub fn js_log(output: JsValue, message: JsValue, level: Option<String>) -> Result<(), JsValue> {
    let output: HtmlElement = output.dyn_into().map_err(|_| {
        to_js_error("Unable to log message: output handle is missing or not an HTMLElement")
    })?;
    let level = level.as_deref().map(LogLevel::from_name).unwrap_or_default();

    log_to(&output, &log_message(&message), level).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_message() {
        assert_eq!(number_message(0.0), "");
        assert_eq!(number_message(-0.0), "");
        assert_eq!(number_message(f64::NAN), "");
        assert_eq!(number_message(42.0), "42");
        assert_eq!(number_message(-1.5), "-1.5");
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::*;
        use crate::core::normalize_response;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn frozen_outcome_rejects_writes() {
            let outcome = normalize_response(404, "Not Found", "");
            let value = outcome.serialize(&Serializer::json_compatible()).unwrap();
            deep_freeze(&value);

            let data = Reflect::get(&value, &"data".into()).unwrap();
            assert!(Object::is_frozen(value.unchecked_ref()));
            assert!(Object::is_frozen(data.unchecked_ref()));

            let _ = Reflect::set(&data, &"status".into(), &JsValue::from(1));
            let _ = Reflect::set(&value, &"isError".into(), &JsValue::FALSE);
            let status = Reflect::get(&data, &"status".into()).unwrap();
            assert_eq!(status.as_f64(), Some(404.0));
            assert_eq!(Reflect::get(&value, &"isError".into()).unwrap(), JsValue::TRUE);
        }

        #[wasm_bindgen_test]
        fn falsy_log_messages_are_empty() {
            assert_eq!(log_message(&JsValue::from(0)), "");
            assert_eq!(log_message(&JsValue::from(f64::NAN)), "");
            assert_eq!(log_message(&JsValue::FALSE), "");
            assert_eq!(log_message(&JsValue::from("")), "");
            assert_eq!(log_message(&JsValue::NULL), "");
            assert_eq!(log_message(&JsValue::from(7)), "7");
            assert_eq!(log_message(&JsValue::TRUE), "true");
        }
    }
}
