//! Error types for the Twitter API v2 client.
//!
//! This module provides a single error type covering every failure mode of
//! the client: caller-side composition errors caught before any I/O,
//! transport failures, and errors reported by the API itself.

use serde_json::Value;
use thiserror::Error;

use crate::client::ApiProblem;
use crate::query::SelectorFamily;

/// A specialized `Result` type for Twitter API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all client operations.
///
/// Partial failures (a response carrying both `data` and `errors`) are not
/// errors; they surface as a successful [`Response`](crate::client::Response)
/// whose [`errors()`](crate::client::Response::errors) slice is non-empty.
#[derive(Error, Debug)]
pub enum Error {
    /// A selector was rendered into a parameter of a different family, or a
    /// dynamically assembled selector name is not part of its catalog.
    #[error("Invalid selector `{selector}` for parameter `{}`", .expected.param_name())]
    InvalidSelector {
        /// The offending selector name
        selector: String,
        /// The family the parameter accepts
        expected: SelectorFamily,
    },

    /// No bearer credential is configured
    #[error("No bearer token configured")]
    Unauthenticated,

    /// HTTP request failed (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connecting or reading timed out
    #[error("Request timeout")]
    Timeout,

    /// Streaming connection ended unexpectedly
    #[error("Stream disconnected")]
    StreamDisconnected,

    /// The API returned an error payload
    #[error("API error: status={status}, {}", summarize(.errors))]
    Api {
        /// HTTP status code
        status: u16,
        /// Error objects exactly as the API reported them
        errors: Vec<ApiProblem>,
        /// Raw response body for debugging
        body: Value,
    },

    /// A single-entity lookup returned errors and no data
    #[error("Not found: {}", summarize(.errors))]
    NotFound {
        /// Error objects describing the missing resource
        errors: Vec<ApiProblem>,
    },

    /// A success response lacked the expected `data` member
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A combined rule update had nothing to add and nothing to delete
    #[error("Rule operation has neither rules to add nor IDs to delete")]
    EmptyRuleOperation,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The streaming session gave up reconnecting
    #[error("Reconnect attempts exhausted after {attempts} attempts")]
    ReconnectExhausted {
        /// Number of attempts made
        attempts: u32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn summarize(errors: &[ApiProblem]) -> String {
    match errors.first() {
        Some(first) => {
            let text = first
                .detail
                .as_deref()
                .or(first.title.as_deref())
                .unwrap_or("unknown error");
            if errors.len() > 1 {
                format!("{} (+{} more)", text, errors.len() - 1)
            } else {
                text.to_string()
            }
        }
        None => "no error detail".to_string(),
    }
}

impl Error {
    /// Returns `true` for network, timeout and malformed-body failures.
    ///
    /// These are the failures a streaming session recovers from by
    /// reconnecting.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Json(_) | Error::Timeout | Error::StreamDisconnected
        )
    }

    /// Returns `true` if the API itself reported the failure.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::NotFound { .. })
    }

    /// Returns `true` if a single-entity lookup found nothing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Api { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Returns `true` if this error is potentially transient and the
    /// operation could be re-issued by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status == 429 || *status >= 500,
            Error::Http(_) | Error::Timeout | Error::StreamDisconnected => true,
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Unauthenticated => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidSelector { .. }
            | Error::InvalidInput(_)
            | Error::EmptyRuleOperation
            | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a non-success response body.
    ///
    /// Accepts both the envelope shape (`{"errors": [...]}`) and the
    /// problem-details shape (`{"title": .., "detail": .., "type": ..}`).
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let errors = match body.get("errors") {
            Some(list) => serde_json::from_value(list.clone()).unwrap_or_default(),
            None if body.get("title").is_some() || body.get("detail").is_some() => {
                serde_json::from_value(body.clone())
                    .map(|problem| vec![problem])
                    .unwrap_or_default()
            }
            None => Vec::new(),
        };

        Error::Api {
            status,
            errors,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(Error::Timeout.is_retryable());
        assert!(Error::StreamDisconnected.is_retryable());
        assert!(!Error::InvalidInput("bad".into()).is_retryable());
        assert!(!Error::EmptyRuleOperation.is_retryable());
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::Unauthenticated.is_auth_error());
        assert!(Error::from_api_response(401, serde_json::json!({})).is_auth_error());
        assert!(!Error::Timeout.is_auth_error());
    }

    #[test]
    fn test_transport_vs_api() {
        let json_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        assert!(Error::Json(json_err).is_transport());
        assert!(!Error::NotFound { errors: vec![] }.is_transport());
        assert!(Error::NotFound { errors: vec![] }.is_api_error());
        assert!(Error::NotFound { errors: vec![] }.is_not_found());
    }

    #[test]
    fn test_from_api_response_envelope() {
        let body = serde_json::json!({
            "errors": [{
                "title": "Invalid Request",
                "detail": "One or more parameters to your request was invalid.",
                "type": "https://api.twitter.com/2/problems/invalid-request"
            }]
        });

        match Error::from_api_response(400, body) {
            Error::Api { status, errors, .. } => {
                assert_eq!(status, 400);
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].title.as_deref(), Some("Invalid Request"));
                assert_eq!(
                    errors[0].problem_type.as_deref(),
                    Some("https://api.twitter.com/2/problems/invalid-request")
                );
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_api_response_problem_details() {
        let body = serde_json::json!({
            "title": "Unauthorized",
            "detail": "Unauthorized",
            "type": "about:blank",
            "status": 401
        });

        let err = Error::from_api_response(401, body);
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "API error: status=401, Unauthorized");
    }
}
