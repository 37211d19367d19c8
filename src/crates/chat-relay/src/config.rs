//! Relay configuration
//!
//! Read from the file named by `CONFIG_PATH`, else `config/chat-relay.toml`
//! when it exists, else built-in defaults. `HOST`, `PORT`, `OPENAI_API_KEY`,
//! `OPENAI_BASE_URL` and `OPENAI_MODEL` override the file.

use llm::config::{DEFAULT_MODEL, OPENAI_BASE_URL};
use llm::RemoteLlmConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use utils::UtilsError;

/// Default location of the config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/chat-relay.toml";

#[derive(Debug, Error)]
pub enum RelayConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<UtilsError> for RelayConfigError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::Io(e) => RelayConfigError::Read(e),
            invalid @ UtilsError::InvalidEnv { .. } => RelayConfigError::InvalidConfig(invalid.to_string()),
            other => RelayConfigError::Parse(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

/// Completion API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiSection {
    /// API key; may be written as `${OPENAI_API_KEY}`
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub organization: Option<String>,
}

impl Default for OpenAiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            organization: None,
        }
    }
}

fn default_base_url() -> String {
    OPENAI_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub openai: OpenAiSection,
}

impl RelayConfig {
    /// Load the file configuration and apply process environment overrides
    pub fn load() -> Result<Self, RelayConfigError> {
        let mut config = match utils::get_env("CONFIG_PATH") {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH)?,
            None => {
                tracing::info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(utils::get_env)?;
        Ok(config)
    }

    /// Parse a TOML, YAML or JSON file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RelayConfigError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading relay configuration");

        let mut config: RelayConfig = utils::load_config_file(path)?;

        config.openai.api_key = config.openai.api_key.map(|key| utils::expand_env_var(&key));
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), RelayConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = utils::parse_env_with::<u16, _>("PORT", &lookup)? {
            self.server.port = port;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.openai.base_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.openai.model = model;
        }
        Ok(())
    }

    /// Resolve the listen address; `host` may be a name such as `localhost`
    pub async fn socket_addr(&self) -> Result<SocketAddr, RelayConfigError> {
        let host = self.server.host.as_str();
        let unresolved =
            |detail: String| RelayConfigError::InvalidConfig(format!("Cannot resolve listen host '{}': {}", host, detail));

        tokio::net::lookup_host((host, self.server.port))
            .await
            .map_err(|e| unresolved(e.to_string()))?
            .next()
            .ok_or_else(|| unresolved("no addresses".to_string()))
    }

    /// Completion client settings, or `None` when no usable API key is set.
    ///
    /// A key still reading `${...}` refers to an unset variable.
    pub fn completion_config(&self) -> Option<RemoteLlmConfig> {
        let key = self
            .openai
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))?;

        let mut config = RemoteLlmConfig::new(key, &self.openai.base_url, &self.openai.model)
            .with_timeout(Duration::from_secs(self.openai.timeout_secs));
        if let Some(org) = &self.openai.organization {
            config = config.with_organization(org);
        }
        Some(config)
    }
}
