//! Chat endpoint handler

use axum::{body::Bytes, extract::State, Json};
use llm::CompletionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{RelayError, RelayResult};
use crate::api::routes::AppState;

/// Successful chat reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

/// Pull the `message` string out of a raw request body
fn parse_message(body: &[u8]) -> RelayResult<String> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::invalid_json())?;

    match value.get("message").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => Ok(message.to_string()),
        _ => Err(RelayError::missing_message()),
    }
}

/// Handler for POST /chat
///
/// Forwards one message, framed by the assistant system prompt, to the
/// completion API and returns the generated text.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> RelayResult<Json<ChatResponse>> {
    let message = parse_message(&body)?;
    let model = state.model.as_ref().ok_or(RelayError::MissingApiKey)?;

    tracing::debug!(model = model.model_name(), chars = message.len(), "Relaying chat message");
    let text = model.complete(CompletionRequest::assistant(message)).await?;

    Ok(Json(ChatResponse { text }))
}
