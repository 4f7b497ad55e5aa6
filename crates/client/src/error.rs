//! Typed error enum for the REST client.

use pdfshelf_core::error_message_from_body;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors from pdfshelf API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: missing, expired or rejected credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Any 5xx.
    #[error("server error {code}: {message}")]
    Server { code: u16, message: String },
    /// Any other non-success status, carrying the server's message.
    #[error("request rejected ({code}): {message}")]
    Rejected { code: u16, message: String },
    /// No response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("JSON parse error in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    /// Local token storage could not be read or written.
    #[error("token storage: {0}")]
    Storage(String),
}

impl ApiError {
    /// Classifies a non-success response.
    ///
    /// The message is taken from the `{message}` field of the body when there
    /// is one, otherwise from the raw body or the status reason phrase.
    #[must_use]
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = error_message_from_body(body).unwrap_or_else(|| {
            StatusCode::from_u16(code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("request failed")
                .to_owned()
        });
        match code {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::Server { code, message },
            _ => Self::Rejected { code, message },
        }
    }

    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::Server { code, .. } | Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Message reported by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(m) | Self::NotFound(m) | Self::RateLimited(m) => Some(m),
            Self::Server { message, .. } | Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this error is transient and the request may succeed later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited(_) => true,
            Self::Server { code, .. } => matches!(code, 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_body_message() {
        let err = ApiError::from_status(
            400,
            r#"{"status":400,"code":4000,"message":"Invalid file ID"}"#,
        );
        assert!(matches!(&err, ApiError::Rejected { code: 400, message } if message == "Invalid file ID"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_from_status_falls_back_to_reason() {
        let err = ApiError::from_status(404, "");
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), Some("Not Found"));
    }

    #[test]
    fn test_classification() {
        assert!(ApiError::from_status(401, "").is_auth());
        assert!(ApiError::from_status(429, "").is_transient());
        assert!(ApiError::from_status(503, "").is_transient());
        assert!(!ApiError::from_status(501, "").is_transient());
        assert!(!ApiError::from_status(409, "").is_transient());
    }
}
