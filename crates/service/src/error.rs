//! Typed error enum for the service layer.
//!
//! Wraps validation, API and local I/O failures so callers can match on the
//! failure mode and render a message without downcasting.

use pdfshelf_client::{ApiError, login_error_message};
use pdfshelf_core::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No stored credential; no request was sent.
    #[error("not signed in")]
    Unauthenticated,

    #[error("api: {0}")]
    Api(#[from] ApiError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The list controller was closed.
    #[error("list is closed")]
    Closed,
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether the caller has to sign in (again).
    #[must_use]
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::Api(e) => e.is_auth(),
            _ => false,
        }
    }

    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Short text for a notification: the server's message when there is one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.server_message().map_or_else(|| e.to_string(), ToOwned::to_owned),
            Self::Validation(errors) => errors
                .errors()
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }

    /// Text for a failed sign-in attempt.
    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::Api(e) => login_error_message(e),
            other => other.user_message(),
        }
    }
}
