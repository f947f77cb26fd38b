//! Backend RPC calls.
//!
//! A call is one multipart `POST` to the backend entry point naming a
//! controller and a function, with the parameters as a JSON form field.
//! Whatever happens, the caller gets an [`Outcome`].

use gloo_net::http::Request;
use serde_json::{Map, Value};
use web_sys::{FormData, RequestCredentials, RequestMode};

use crate::config::backend::{
    CALL_METHOD, FIELD_AUTH_KEY, FIELD_CONTROLLER, FIELD_FUNCTION, FIELD_METHOD, FIELD_PARAMETERS,
};
use crate::core::error::FetchError;
use crate::core::{normalize_response, Outcome};

/// Form fields of a single backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest<'a> {
    pub auth_key: &'a str,
    pub controller: &'a str,
    pub function: &'a str,
    pub data: &'a Map<String, Value>,
}

impl BackendRequest<'_> {
    /// Name/value pairs in the order they are appended to the form.
    pub fn form_fields(&self) -> [(&'static str, String); 5] {
        [
            (FIELD_AUTH_KEY, self.auth_key.to_string()),
            (FIELD_CONTROLLER, self.controller.to_string()),
            (FIELD_FUNCTION, self.function.to_string()),
            (FIELD_METHOD, CALL_METHOD.to_string()),
            (FIELD_PARAMETERS, Value::Object(self.data.clone()).to_string()),
        ]
    }

    fn form_data(&self) -> Result<FormData, FetchError> {
        let form = FormData::new().map_err(|_| FetchError::RequestCreationFailed)?;
        for (name, value) in self.form_fields() {
            form.append_with_str(name, &value)
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }
        Ok(form)
    }
}

/// Raw reply of the transport, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TransportReply {
    status: u16,
    status_text: String,
    body: String,
}

/// Entry point and credentials shared by a series of backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendClient {
    entry_point: String,
    auth_key: String,
}

impl BackendClient {
    pub fn new(entry_point: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self {
            entry_point: entry_point.into(),
            auth_key: auth_key.into(),
        }
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Invoke `controller.function` with `data`.
    pub async fn call(&self, controller: &str, function: &str, data: &Map<String, Value>) -> Outcome {
        backend_call(&self.entry_point, &self.auth_key, controller, function, data).await
    }
}

/// Perform one backend call and normalize its reply.
///
/// Exactly one request is sent; there are no retries. A request that never
/// produces a response yields a failure with status 0.
pub async fn backend_call(
    entry_point: &str,
    auth_key: &str,
    controller: &str,
    function: &str,
    data: &Map<String, Value>,
) -> Outcome {
    let request = BackendRequest {
        auth_key,
        controller,
        function,
        data,
    };

    let outcome = reply_outcome(send(entry_point, &request).await);

    if let Some(failure) = outcome.failure() {
        tracing::warn!(
            controller,
            function,
            status = failure.status(),
            message = failure.message(),
            "backend call failed"
        );
    }
    outcome
}

fn reply_outcome(reply: Result<TransportReply, FetchError>) -> Outcome {
    match reply {
        Ok(reply) => normalize_response(reply.status, &reply.status_text, &reply.body),
        Err(e) => Outcome::transport_error(&e.to_string()),
    }
}

fn read_body(text: Result<String, gloo_net::Error>) -> Result<String, FetchError> {
    text.map_err(|e| {
        tracing::warn!(error = %e, "failed to read backend response body");
        FetchError::NetworkError(e.to_string())
    })
}

async fn send(entry_point: &str, request: &BackendRequest<'_>) -> Result<TransportReply, FetchError> {
    let response = Request::post(entry_point)
        .credentials(RequestCredentials::Include)
        .mode(RequestMode::SameOrigin)
        .header("Accept", "application/json")
        .body(request.form_data()?)
        .map_err(|e| FetchError::NetworkError(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::NetworkError(e.to_string()))?;

    let body = read_body(response.text().await)?;

    Ok(TransportReply {
        status: response.status(),
        status_text: response.status_text(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_fields() {
        let data = json!({"id": 5, "tags": ["a"]});
        let request = BackendRequest {
            auth_key: "secret",
            controller: "Users",
            function: "find",
            data: data.as_object().unwrap(),
        };

        let fields = request.form_fields();
        assert_eq!(fields[0], ("authKey", "secret".to_string()));
        assert_eq!(fields[1], ("controller", "Users".to_string()));
        assert_eq!(fields[2], ("function", "find".to_string()));
        assert_eq!(fields[3], ("method", "call".to_string()));
        assert_eq!(fields[4].0, "parameters");

        let parameters: Value = serde_json::from_str(&fields[4].1).unwrap();
        assert_eq!(parameters, data);
    }

    #[test]
    fn test_empty_parameters_encode_as_object() {
        let data = Map::new();
        let request = BackendRequest {
            auth_key: "",
            controller: "c",
            function: "f",
            data: &data,
        };
        assert_eq!(request.form_fields()[4].1, "{}");
    }

    #[test]
    fn test_unreadable_body_is_transport_failure() {
        let read = read_body(Err(gloo_net::Error::GlooError("stream aborted".to_string())));
        assert_eq!(read, Err(FetchError::NetworkError("stream aborted".to_string())));

        let outcome = reply_outcome(read.map(|body| TransportReply {
            status: 200,
            status_text: "OK".to_string(),
            body,
        }));
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.status(), 0);
        assert!(failure.message().contains("stream aborted"));
    }

    #[test]
    fn test_readable_body_is_normalized() {
        let body = read_body(Ok(r#"{"RESPONSE_CODE":0,"RESPONSE":{"STATUS_CODE":0,"DATA":true}}"#.to_string()));
        let outcome = reply_outcome(body.map(|body| TransportReply {
            status: 200,
            status_text: "OK".to_string(),
            body,
        }));
        assert_eq!(outcome, Outcome::Success(Some(Value::Bool(true))));
    }

    #[test]
    fn test_client_keeps_entry_point() {
        let client = BackendClient::new("/api/proxy", "key");
        assert_eq!(client.entry_point(), "/api/proxy");
    }
}
