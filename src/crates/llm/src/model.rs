//! Completion request types and the provider trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// System prompt that frames every assistant request.
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful task management assistant integrated into the \"Zest Tasks\" app. \
Your expertise is in productivity, time management, and organization. \
Provide helpful, concise responses focused on helping users manage their tasks, workflows, and productivity. \
Responses should be friendly, motivational, and actionable. \
Keep your responses concise (under 200 words) unless the user asks for detailed information.";

/// Sampling defaults used by the assistant.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TOP_P: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A one-shot completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request from raw messages with no sampling overrides.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
        }
    }

    /// Build the assistant request for a single user message: the fixed
    /// system prompt, the message, and the assistant's sampling defaults.
    pub fn assistant(message: impl Into<String>) -> Self {
        Self::new(vec![
            ChatMessage::system(ASSISTANT_SYSTEM_PROMPT),
            ChatMessage::user(message),
        ])
        .with_temperature(DEFAULT_TEMPERATURE)
        .with_top_p(DEFAULT_TOP_P)
        .with_max_tokens(DEFAULT_MAX_TOKENS)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A provider that turns a completion request into generated text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Run a single completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Name of the model requests are sent to.
    fn model_name(&self) -> &str;
}
