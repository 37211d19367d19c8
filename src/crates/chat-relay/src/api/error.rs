//! Relay error types and HTTP response conversion
//!
//! Every failure is answered as `{"error": "<message>"}`. Upstream failures
//! keep the provider's status code and body text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use llm::LlmError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Relay result type
pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The request body could not be used
    #[error("{0}")]
    BadRequest(String),

    /// No completion API key is configured
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The completion API answered with a non-success status
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn invalid_json() -> Self {
        RelayError::BadRequest("Invalid JSON in request body".to_string())
    }

    pub fn missing_message() -> Self {
        RelayError::BadRequest("Request body must be JSON with a 'message' string.".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::MissingApiKey | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl From<LlmError> for RelayError {
    fn from(err: LlmError) -> Self {
        if err.is_auth_error() {
            tracing::warn!(error = %err, "Completion API key is missing or was refused");
        }

        match err {
            LlmError::Upstream { status, body } => RelayError::Upstream { status, body },
            LlmError::ApiKeyNotFound(_) => RelayError::MissingApiKey,
            other => RelayError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Chat relay request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Chat relay request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
