//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use llm::{CompletionModel, OpenAiClient};
use std::sync::Arc;

use crate::api::{handlers, middleware};
use crate::config::RelayConfig;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Completion client; `None` when no API key is configured
    pub model: Option<Arc<dyn CompletionModel>>,
}

impl AppState {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model: Some(model) }
    }

    /// State without a completion client; chat requests answer 500
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Build the OpenAI client described by the config, if it has a key
    pub fn from_config(config: &RelayConfig) -> llm::Result<Self> {
        match config.completion_config() {
            Some(llm_config) => {
                tracing::info!(model = %llm_config.model, base_url = %llm_config.base_url, "Completion API configured");
                Ok(Self::new(Arc::new(OpenAiClient::new(llm_config)?)))
            }
            None => {
                tracing::warn!("OPENAI_API_KEY is not set; chat requests will fail");
                Ok(Self::unconfigured())
            }
        }
    }
}

/// Build the relay router
///
/// The chat endpoint is mounted both at `/chat` and at the edge function
/// path so the CLI can use the relay in place of the hosted function.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/functions/v1/chat", post(handlers::chat))
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(middleware::logging_layer())
}
