//! Error types for the TomatoMall client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Errors returned by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// The backend rejected the session. A login redirect has already been
    /// handled; callers should not report this.
    #[error("session rejected; redirecting to login")]
    Suppressed,

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading or writing the session store failed.
    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    /// Local file access failed (e.g. reading an upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether this error is the silent 401 signal.
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }

    /// HTTP status carried by the error, if any.
    ///
    /// `Suppressed` reports 401 since that is the status it absorbed.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Suppressed => Some(StatusCode::UNAUTHORIZED),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Message suitable for showing to a user, or `None` when nothing should
    /// be shown.
    #[must_use]
    pub fn display_message(&self) -> Option<String> {
        match self {
            Self::Suppressed => None,
            Self::Status { message, .. } => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Result type alias for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
