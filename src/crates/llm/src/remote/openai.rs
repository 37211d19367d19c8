//! OpenAI client implementation.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint
//! (GPT-3.5 Turbo by default).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::OpenAiClient;
//! use llm::config::RemoteLlmConfig;
//! use llm::{CompletionModel, CompletionRequest};
//!
//! let config = RemoteLlmConfig::new(api_key, "http://localhost:4000/v1", "gpt-4o-mini");
//! let client = OpenAiClient::new(config)?;
//!
//! let text = client.complete(CompletionRequest::assistant("Hello!")).await?;
//! ```

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::model::{ChatMessage, CompletionModel, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI API client.
#[derive(Clone)]
pub struct OpenAiClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &RemoteLlmConfig {
        &self.config
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> OpenAiRequest<'a> {
        OpenAiRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
        }
    }
}

/// Pull the completion text out of a successful response body.
pub(crate) fn extract_text(body: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidJson(e.to_string()))?;

    let response: OpenAiResponse = serde_json::from_value(value)
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            prompt_tokens = ?usage.prompt_tokens,
            completion_tokens = ?usage.completion_tokens,
            "OpenAI usage"
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("response carries no choices[0].message.content".to_string()))
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = self.config.completions_url();

        let mut req = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_body(&request));

        if let Some(org) = &self.config.organization {
            req = req.header("OpenAI-Organization", org);
        }

        tracing::info!(model = %self.config.model, "Sending request to OpenAI API");
        let response = req.send().await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "OpenAI API response status");

        let body = response.text().await?;
        tracing::debug!(body = %body, "OpenAI API response body");

        if !status.is_success() {
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to read OpenAI response");
            e
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

/// Token counts; gateways often send only some of them
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: Option<u64>,
    #[serde(default)]
    completion_tokens: Option<u64>,
}
