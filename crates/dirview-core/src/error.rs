//! Error types for console operations.
//!
//! A single error hierarchy is shared by every dirview crate. It separates
//! transport failures, HTTP status failures, and malformed payloads, and knows
//! how to phrase itself for the console's error banner.

use thiserror::Error;

/// Message shown when a 400 response carries no `error` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Main error type for console operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Timeout waiting for backend: {0}")]
    Timeout(String),

    /// Backend answered 400; carries the body's `error` message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Backend answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx answer
    #[error("HTTP error! status: {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response decoded but had an unexpected shape
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Invalid request input (e.g. a malformed distinguished name)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid endpoint URL or path
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for console operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::UnexpectedPayload(_) => "UNEXPECTED_PAYLOAD",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// HTTP status code carried by this error, if it came from a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the error banner.
    ///
    /// A 400 shows the backend's message verbatim, any other status shows
    /// `HTTP error! status: N`, everything else shows the error itself.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self {
            Self::BadRequest(message) if message.is_empty() => UNKNOWN_ERROR_MESSAGE.to_string(),
            Self::BadRequest(message) => message.clone(),
            other => match other.status() {
                Some(status) => format!("HTTP error! status: {status}"),
                None => other.to_string(),
            },
        }
    }

    /// Returns true if this error should be logged at error level rather than
    /// as a degraded-but-expected condition.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_) | Self::InvalidEndpoint(_) | Self::ParseError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ServiceUnavailable("test".to_string()).error_code(),
            "SERVICE_UNAVAILABLE"
        );
        assert_eq!(Error::Timeout("test".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::UnexpectedStatus {
                status: 500,
                message: String::new()
            }
            .error_code(),
            "UNEXPECTED_STATUS"
        );
        assert_eq!(
            Error::UnexpectedPayload("42".to_string()).error_code(),
            "UNEXPECTED_PAYLOAD"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_bad_request_alert_uses_backend_message() {
        let err = Error::BadRequest("Invalid search base".to_string());
        assert_eq!(err.alert_message(), "Invalid search base");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_bad_request_without_message() {
        let err = Error::BadRequest(String::new());
        assert_eq!(err.alert_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_other_status_alert_is_generic() {
        let err = Error::UnexpectedStatus {
            status: 502,
            message: "<html>bad gateway</html>".to_string(),
        };
        assert_eq!(err.alert_message(), "HTTP error! status: 502");

        let err = Error::NotFound("no such object".to_string());
        assert_eq!(err.alert_message(), "HTTP error! status: 404");
    }

    #[test]
    fn test_transport_error_alert() {
        let err = Error::ServiceUnavailable("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(
            err.alert_message(),
            "Service unavailable: connection refused"
        );
    }

    #[test]
    fn test_should_log() {
        assert!(Error::ConfigError("test".to_string()).should_log());
        assert!(Error::ParseError("test".to_string()).should_log());

        assert!(!Error::NotFound("test".to_string()).should_log());
        assert!(!Error::ServiceUnavailable("test".to_string()).should_log());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let console_err: Error = err.into();
        assert!(matches!(console_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let console_err: Error = err.into();
        assert!(matches!(console_err, Error::ParseError(_)));
    }
}
