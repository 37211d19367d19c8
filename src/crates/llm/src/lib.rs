//! Chat-completion client for the zest assistant.
//!
//! This crate exposes a small [`CompletionModel`] trait and an OpenAI-compatible
//! implementation of it. A completion is a single request: a fixed system
//! prompt plus one user message in, one generated text out. No conversation
//! history is kept and responses are not streamed.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use llm::config::RemoteLlmConfig;
//! use llm::remote::OpenAiClient;
//! use llm::{CompletionModel, CompletionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::from_env("OPENAI_API_KEY")?;
//!     let client = OpenAiClient::new(config)?;
//!
//!     let request = CompletionRequest::assistant("How do I plan my week?");
//!     let text = client.complete(request).await?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;

#[cfg(feature = "remote")]
pub mod remote;

pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use model::{ChatMessage, ChatRole, CompletionModel, CompletionRequest, ASSISTANT_SYSTEM_PROMPT};

#[cfg(feature = "remote")]
pub use remote::OpenAiClient;
