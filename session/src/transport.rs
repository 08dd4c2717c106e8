//! Transport-neutral HTTP request/response model.
//!
//! The browser sends through `gloo-net`, the CLI through `reqwest`; both
//! implement [`Transport`] so the authenticated client above them stays
//! testable with an in-memory fake.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One value in a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, content_type: String, bytes: Vec<u8> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    #[must_use]
    pub fn text(name: &str, value: &str) -> Self {
        Self { name: name.to_owned(), value: FormValue::Text(value.to_owned()) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Transports must abandon the request with [`ClientError::NetworkFailure`]
    /// once this elapses.
    pub timeout: Duration,
}

impl ApiRequest {
    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RemoteRejection`] when the body does not match `T`;
    /// the backend answered, but not with something this client understands.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| ClientError::RemoteRejection {
            status: self.status,
            message: format!("unexpected response body: {err}"),
        })
    }

    /// The `error` field of a JSON error payload, if present.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null);
        value.get("error").and_then(serde_json::Value::as_str).map(str::to_owned)
    }
}

/// Something that can carry an [`ApiRequest`] to the backend.
pub trait Transport {
    /// Send `request` and collect the full response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NetworkFailure`] when no response arrives,
    /// including when `request.timeout` elapses.
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ClientError>>;
}
