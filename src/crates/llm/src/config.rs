//! Completion endpoint settings.

use crate::error::{LlmError, Result};
use std::time::Duration;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and how to reach an OpenAI-compatible completion API
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteLlmConfig {
    pub api_key: String,
    /// Base URL without a trailing slash, e.g. `http://localhost:4000/v1`
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    /// Sent as `OpenAI-Organization` when set
    pub organization: Option<String>,
}

impl RemoteLlmConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            organization: None,
        }
    }

    /// The public OpenAI endpoint with the default model
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(api_key, OPENAI_BASE_URL, DEFAULT_MODEL)
    }

    /// [`RemoteLlmConfig::openai`] with the key read from `env_var`.
    ///
    /// Fails with [`LlmError::ApiKeyNotFound`] when the variable is unset or blank.
    pub fn from_env(env_var: &str) -> Result<Self> {
        match std::env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::openai(key)),
            _ => Err(LlmError::ApiKeyNotFound(format!("{} is not set", env_var))),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
