//! Configuration schema

use crate::error::{Result, ZestError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Message shown when the assistant cannot be reached
pub const ASSISTANT_FALLBACK_MESSAGE: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// Main zest configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZestConfig {
    /// Hosted backend connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// Chat assistant settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Where the CLI keeps the signed-in session
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public anon key (supports `${VAR}` interpolation)
    #[serde(default)]
    pub anon_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Chat assistant settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Edge function that relays chat messages
    #[serde(default = "default_function")]
    pub function: String,

    /// Reply shown when the relay fails
    #[serde(default = "default_fallback")]
    pub fallback_message: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            function: default_function(),
            fallback_message: default_fallback(),
        }
    }
}

fn default_function() -> String {
    "chat".to_string()
}

fn default_fallback() -> String {
    ASSISTANT_FALLBACK_MESSAGE.to_string()
}

/// Session storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file path (defaults to `<config dir>/zest/session.json`)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// One config file as written; keys it leaves out stay `None`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub backend: BackendLayer,
    pub assistant: AssistantLayer,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendLayer {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantLayer {
    pub function: Option<String>,
    pub fallback_message: Option<String>,
}

impl ZestConfig {
    /// Apply a config file on top of this one; every key the file sets wins
    pub fn merge(&mut self, layer: ConfigLayer) {
        let ConfigLayer {
            backend,
            assistant,
            session,
        } = layer;

        if let Some(url) = backend.url {
            self.backend.url = url;
        }
        if let Some(anon_key) = backend.anon_key {
            self.backend.anon_key = anon_key;
        }
        if let Some(timeout_secs) = backend.timeout_secs {
            self.backend.timeout_secs = timeout_secs;
        }
        if let Some(function) = assistant.function {
            self.assistant.function = function;
        }
        if let Some(fallback_message) = assistant.fallback_message {
            self.assistant.fallback_message = fallback_message;
        }
        if session.path.is_some() {
            self.session.path = session.path;
        }
    }

    /// Resolve `${VAR}` references in string fields
    pub fn resolve_env_vars(&mut self) {
        self.backend.url = utils::expand_env_var(&self.backend.url);
        self.backend.anon_key = utils::expand_env_var(&self.backend.anon_key);
    }

    /// Apply `SUPABASE_URL` / `SUPABASE_ANON_KEY` overrides from `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL").filter(|v| !v.is_empty()) {
            self.backend.url = url;
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY").filter(|v| !v.is_empty()) {
            self.backend.anon_key = key;
        }
    }

    /// Check that the backend can be reached with this configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.is_empty() {
            return Err(ZestError::Config(
                "backend.url is not set (set SUPABASE_URL or add it to ~/.zest/zest.toml)".to_string(),
            ));
        }
        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            return Err(ZestError::Config(format!(
                "backend.url must start with http:// or https://, got '{}'",
                self.backend.url
            )));
        }
        if self.backend.anon_key.is_empty() {
            return Err(ZestError::Config(
                "backend.anon_key is not set (set SUPABASE_ANON_KEY or add it to ~/.zest/zest.toml)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved session file path
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session.path {
            Some(path) => Ok(path.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join("zest").join("session.json"))
                .ok_or_else(|| ZestError::Config("Could not determine config directory".to_string())),
        }
    }
}
