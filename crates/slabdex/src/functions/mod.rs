//! Serverless-style request handlers.
//!
//! Handlers are transport-agnostic: an event-shaped [`FunctionRequest`]
//! goes in, a status plus serialized JSON body comes out. The host
//! runtime owns sockets, CORS headers, and scheduling; this module owns
//! method checks, parameter parsing, identity checks, and the mapping
//! of [`Error`](crate::error::Error) values onto status codes and
//! `{"error": ...}` payloads.

pub mod login;
pub mod logout;
pub mod register;
pub mod search;

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// HTTP method of an incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
    /// HTTP OPTIONS.
    Options,
}

/// An incoming serverless event.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    /// HTTP method of the event.
    pub method: Method,
    /// Query string parameters.
    pub params: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Raw request body, if any.
    pub body: Option<String>,
}

impl FunctionRequest {
    /// Start building a GET event.
    #[must_use]
    pub fn get() -> Self {
        Self::with_method(Method::Get)
    }

    /// Start building a POST event.
    #[must_use]
    pub fn post() -> Self {
        Self::with_method(Method::Post)
    }

    /// Start building an event with the given method.
    #[must_use]
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            params: HashMap::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a query string parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a query string parameter.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Extract the bearer token from the `Authorization` header.
    ///
    /// Header name lookup is case-insensitive; the `Bearer ` prefix is
    /// optional, matching how the original clients sent it.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())?;
        Some(value.strip_prefix("Bearer ").unwrap_or(value))
    }

    /// Parse the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// A missing or malformed body is [`Error::InvalidQuery`]; the
    /// caller can fix it, so it maps to 400.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| Error::InvalidQuery("Request body is required".to_string()))?;
        serde_json::from_str(body)
            .map_err(|_| Error::InvalidQuery("Invalid JSON body".to_string()))
    }
}

/// Outgoing response: status code plus serialized JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    /// HTTP status code.
    pub status: u16,
    /// Serialized JSON body.
    pub body: String,
}

impl FunctionResponse {
    /// A 200 response carrying `payload` as JSON.
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status: 200, body },
            Err(err) => Self::from_error(&Error::Json(err)),
        }
    }

    /// Map an error onto its status code and `{"error": ...}` payload.
    ///
    /// Server-side failures are logged here, once, so individual
    /// handlers do not have to.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let status = err.status();
        if status >= 500 {
            tracing::error!(error = %err, status, "request failed");
        } else {
            tracing::debug!(error = %err, status, "request rejected");
        }
        Self {
            status,
            body: json!({ "error": err.to_string() }).to_string(),
        }
    }

    /// Parse the body back into JSON. Handy in tests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] when the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Collapse a handler result into a response.
fn respond<T: Serialize>(result: Result<T>) -> FunctionResponse {
    match result {
        Ok(payload) => FunctionResponse::ok(&payload),
        Err(err) => FunctionResponse::from_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_is_found_case_insensitively() {
        let request = FunctionRequest::get().header("AUTHORIZATION", "Bearer abc");
        assert_eq!(request.bearer_token(), Some("abc"));

        let bare = FunctionRequest::get().header("authorization", "abc");
        assert_eq!(bare.bearer_token(), Some("abc"));

        assert_eq!(FunctionRequest::get().bearer_token(), None);
    }

    #[test]
    fn json_body_errors_are_user_correctable() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            #[allow(dead_code)]
            username: String,
        }

        let missing = FunctionRequest::post().json_body::<Body>().unwrap_err();
        assert_eq!(missing.status(), 400);

        let malformed = FunctionRequest::post()
            .body("{not json")
            .json_body::<Body>()
            .unwrap_err();
        assert_eq!(malformed.status(), 400);
    }

    #[test]
    fn error_responses_carry_a_json_error_payload() {
        let response = FunctionResponse::from_error(&Error::MethodNotAllowed);
        assert_eq!(response.status, 405);
        assert_eq!(response.json().unwrap()["error"], "Method not allowed");
    }
}
