//! Error types for the ThousandEyes API client.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Base error type for ThousandEyes operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("API response did not contain a web transaction")]
    EmptyResponse,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Raised when the API answers with a non-2xx status.
#[derive(Error, Debug)]
#[error("Failed call API endpoint. HTTP response code: {status_code}. Error: {body}")]
pub struct ApiError {
    pub status_code: u16,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status_code: u16, body: ErrorBody) -> Self {
        Self { status_code, body }
    }
}

/// Error payload returned alongside a failed call.
///
/// Decoding is best effort: an unparseable or unrelated body yields the
/// default (empty) value, which renders as `&{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

impl ErrorBody {
    /// Decode an error body, falling back to an empty one.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_message {
            Some(msg) => write!(f, "&{{{}}}", msg),
            None => f.write_str("&{}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_renders_as_empty_struct() {
        let err = ApiError::new(400, ErrorBody::from_body("{}"));
        assert_eq!(
            err.to_string(),
            "Failed call API endpoint. HTTP response code: 400. Error: &{}"
        );
    }

    #[test]
    fn unparseable_body_falls_back_to_empty() {
        assert_eq!(ErrorBody::from_body(""), ErrorBody::default());
        assert_eq!(ErrorBody::from_body("<html>"), ErrorBody::default());
    }

    #[test]
    fn error_message_is_included() {
        let body = ErrorBody::from_body(r#"{"errorMessage":"Invalid test ID"}"#);
        let err = Error::from(ApiError::new(404, body));
        assert_eq!(
            err.to_string(),
            "Failed call API endpoint. HTTP response code: 404. Error: &{Invalid test ID}"
        );
    }
}
