//! Error types for the client SDK.
//!
//! Every failure a request can produce is a closed variant here, so callers
//! can match exhaustively instead of string-probing messages. Classification
//! happens inside [`crate::http::HttpClient`]; by the time a caller sees one
//! of these the user-facing notice has already been shown.

use thiserror::Error;

/// Coarse categories for routing error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// No response was received from the server.
    Network,
    /// Transport-level non-2xx status.
    Http,
    /// Authentication was lost (transport 401 or application 401).
    Auth,
    /// Application-level rejection carried inside a 2xx envelope.
    Business,
    /// Local configuration or session storage problem.
    Local,
}

/// Errors produced by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: the request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx transport status.
    #[error("http status {code}")]
    Status { code: u16 },

    /// Application-level 401: the session token is no longer valid.
    #[error("session expired")]
    SessionExpired,

    /// Application-level 403: the current identity may not perform this.
    #[error("access forbidden")]
    Forbidden,

    /// Any other non-success application code in the response envelope.
    #[error("business error {code}: {message}")]
    Business { code: i64, message: String },

    /// A 2xx response whose body was not a valid envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The persisted session slot could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::Status { code: 401 } | Self::SessionExpired => ErrorCategory::Auth,
            Self::Status { .. } => ErrorCategory::Http,
            Self::Forbidden | Self::Business { .. } | Self::Decode(_) => ErrorCategory::Business,
            Self::Config(_) | Self::Storage(_) => ErrorCategory::Local,
        }
    }

    /// Whether this error cleared (or is about to clear) the local session.
    pub fn is_auth_loss(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
