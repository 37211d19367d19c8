//! Error types for the completion client.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when requesting a completion.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API key not found in environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// The provider answered with a non-success status.
    ///
    /// `body` is the raw response text so callers can relay it verbatim.
    #[error("Upstream error {status}: {body}")]
    Upstream {
        /// HTTP status returned by the provider.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The provider answered 2xx with a body that is not JSON.
    #[error("Invalid JSON from OpenAI API")]
    InvalidJson(String),

    /// The provider answered with JSON that carries no completion text.
    #[error("Invalid response from OpenAI API")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Missing key, or a key the provider refused
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::ApiKeyNotFound(_) | LlmError::Upstream { status: 401 | 403, .. }
        )
    }
}
