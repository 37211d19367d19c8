//! Environment lookups and config file loading.
//!
//! ```rust,ignore
//! use utils::config::{get_env, load_config_file, parse_env_with};
//!
//! let url = get_env("SUPABASE_URL");
//! let port: Option<u16> = parse_env_with("PORT", get_env)?;
//! let config: RelayConfig = load_config_file("config/chat-relay.toml")?;
//! ```

use crate::error::{Result, UtilsError};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;

/// Read an environment variable. Unset and empty values both yield `None`.
///
/// Matches the `Fn(&str) -> Option<String>` lookups the config types take,
/// so it can be passed to them directly.
pub fn get_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Look up `key` and parse it.
///
/// `Ok(None)` when the lookup has no value; an error when the value does not
/// parse. Pass [`get_env`] to read the process environment.
pub fn parse_env_with<T, F>(key: &str, lookup: F) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| UtilsError::InvalidEnv {
                key: key.to_string(),
                message: format!("'{}': {}", raw, e),
            })
        })
        .transpose()
}

/// Resolve a value written as `${VAR}` from the environment.
///
/// Anything else, including a reference to an unset variable, comes back
/// as written so callers can tell the reference was never filled in.
pub fn expand_env_var(value: &str) -> String {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
        .and_then(get_env)
        .unwrap_or_else(|| value.to_string())
}

/// File formats understood by [`load_config_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension, ignoring case
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(UtilsError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str, path: &Path) -> Result<T> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| UtilsError::parse(path, e)),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| UtilsError::parse(path, e)),
            Self::Json => serde_json::from_str(content).map_err(|e| UtilsError::parse(path, e)),
        }
    }
}

/// Read a TOML, YAML or JSON file into `T`
pub fn load_config_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "Parsing config file");
    format.parse(&content, path)
}
