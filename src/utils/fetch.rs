//! Network fetching with timeout support.
//!
//! The request is raced against a browser timer; when the timer wins, the
//! request's `AbortController` is aborted so nothing stays in flight.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, Response};

use crate::core::error::{FetchError, js_error_message};
use crate::utils::dom;
use crate::utils::timer::{race_or_abort, BrowserTimer, RaceResult, Timer};

/// Fetch `url`, aborting the request if it takes longer than `timeout_ms`.
///
/// `init` carries any request configuration; its abort signal is replaced
/// with one owned by this call. A `timeout_ms` of 0 times out immediately,
/// so callers that want no limit must pass a large value.
pub async fn fetch_with_timeout(
    url: &str,
    timeout_ms: u32,
    init: Option<RequestInit>,
) -> Result<Response, FetchError> {
    fetch_with_timer(&BrowserTimer, url, timeout_ms, init).await
}

/// [`fetch_with_timeout`] with an explicit timer source.
pub async fn fetch_with_timer<T: Timer>(
    timer: &T,
    url: &str,
    timeout_ms: u32,
    init: Option<RequestInit>,
) -> Result<Response, FetchError> {
    let window = dom::window().ok_or(FetchError::NoWindow)?;
    let controller = AbortController::new().map_err(|_| FetchError::RequestCreationFailed)?;

    let init = init.unwrap_or_else(RequestInit::new);
    init.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    let fetch = JsFuture::from(window.fetch_with_request(&request));

    let abort = || {
        tracing::debug!(url, timeout_ms, "aborting timed out request");
        controller.abort();
    };

    match race_or_abort(fetch, timer.sleep(timeout_ms), abort).await {
        RaceResult::TimedOut => Err(FetchError::Timeout { timeout_ms }),
        RaceResult::Completed(Err(e)) => Err(FetchError::NetworkError(js_error_message(&e))),
        RaceResult::Completed(Ok(result)) => {
            result.dyn_into::<Response>().map_err(|_| FetchError::InvalidResponse)
        }
    }
}
