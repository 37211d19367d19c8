//! Error types for zest
//!
//! Provides a unified error type for all task, workflow and auth operations.

use thiserror::Error;

/// Result type alias for zest operations
pub type Result<T> = std::result::Result<T, ZestError>;

/// Main error type for zest operations
#[derive(Debug, Error)]
pub enum ZestError {
    /// No session was supplied for a call that needs one
    #[error("User not authenticated")]
    NotAuthenticated,

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend rejected the request
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status of the backend response
        status: u16,
        /// Backend error code (PostgREST `code` or GoTrue `error_code`)
        code: Option<String>,
        /// Human-readable backend message
        message: String,
    },

    /// A row carried a value the domain cannot represent
    #[error("Decode error: {0}")]
    Decode(String),

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZestError {
    /// Create a backend error from a status and message
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            code: None,
            message: message.into(),
        }
    }

    /// Whether the backend refused the credentials or token
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Backend { status: 401, .. }
        )
    }
}

impl From<utils::UtilsError> for ZestError {
    fn from(err: utils::UtilsError) -> Self {
        match err {
            utils::UtilsError::Http(e) => Self::Http(e),
            utils::UtilsError::Io(e) => Self::Io(e),
            other => Self::Config(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for ZestError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
