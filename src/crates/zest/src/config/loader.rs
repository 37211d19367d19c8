//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.zest/zest.toml
//! 3. Project-level config: ./.zest/zest.toml
//! 4. `SUPABASE_URL` / `SUPABASE_ANON_KEY` environment variables
//!
//! Later sources override earlier ones.

use crate::config::schema::{ConfigLayer, ZestConfig};
use crate::error::{Result, ZestError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration loader that handles both user and project configs
pub struct ConfigLoader {
    user_config_path: PathBuf,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the standard locations
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ZestError::Config("Could not determine home directory".to_string()))?;
        let cwd = std::env::current_dir()?;

        Ok(Self::with_paths(
            home.join(".zest").join("zest.toml"),
            cwd.join(".zest").join("zest.toml"),
        ))
    }

    /// Create a loader for explicit paths
    pub fn with_paths(user_config_path: PathBuf, project_config_path: PathBuf) -> Self {
        Self {
            user_config_path,
            project_config_path,
        }
    }

    /// Load configuration from every source, later ones taking precedence
    pub async fn load(&self) -> Result<ZestConfig> {
        let mut config = self.load_files().await?;
        config.apply_env_overrides(utils::get_env);

        info!(backend = %config.backend.url, "Configuration loaded");
        Ok(config)
    }

    /// Load defaults plus both files, without environment overrides
    pub async fn load_files(&self) -> Result<ZestConfig> {
        let mut config = ZestConfig::default();

        for path in [&self.user_config_path, &self.project_config_path] {
            if !path.exists() {
                debug!(path = %path.display(), "Config file not found, skipping");
                continue;
            }
            let layer = Self::load_from_path(path).await?;
            debug!(path = %path.display(), "Loaded config file");
            config.merge(layer);
        }

        config.resolve_env_vars();
        Ok(config)
    }

    /// Read one config file without filling in defaults
    pub async fn load_from_path(path: &Path) -> Result<ConfigLayer> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ZestError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ZestError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn user_config_path(&self) -> &Path {
        &self.user_config_path
    }

    pub fn project_config_path(&self) -> &Path {
        &self.project_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader(dir: &TempDir) -> ConfigLoader {
        ConfigLoader::with_paths(dir.path().join("user.toml"), dir.path().join("project.toml"))
    }

    #[tokio::test]
    async fn test_load_returns_defaults_when_no_files() {
        let dir = TempDir::new().unwrap();
        let config = loader(&dir).load_files().await.unwrap();

        assert!(config.backend.url.is_empty());
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_project_overrides_user() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("user.toml"),
            "[backend]\nurl = \"https://user.supabase.co\"\nanon_key = \"user-key\"\n",
        )
        .await
        .unwrap();
        fs::write(
            dir.path().join("project.toml"),
            "[backend]\nurl = \"https://project.supabase.co\"\n",
        )
        .await
        .unwrap();

        let config = loader(&dir).load_files().await.unwrap();

        assert_eq!(config.backend.url, "https://project.supabase.co");
        assert_eq!(config.backend.anon_key, "user-key");
    }

    #[tokio::test]
    async fn test_project_can_restore_default_values() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("user.toml"),
            "[backend]\ntimeout_secs = 90\n\n[assistant]\nfunction = \"assistant-v2\"\n",
        )
        .await
        .unwrap();
        fs::write(
            dir.path().join("project.toml"),
            "[backend]\ntimeout_secs = 30\n\n[assistant]\nfunction = \"chat\"\n",
        )
        .await
        .unwrap();

        let config = loader(&dir).load_files().await.unwrap();

        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.assistant.function, "chat");
    }

    #[tokio::test]
    async fn test_env_reference_expanded() {
        std::env::set_var("ZEST_TEST_LOADER_ANON_KEY", "from-env");
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("user.toml"),
            "[backend]\nanon_key = \"${ZEST_TEST_LOADER_ANON_KEY}\"\n",
        )
        .await
        .unwrap();

        let config = loader(&dir).load_files().await.unwrap();

        assert_eq!(config.backend.anon_key, "from-env");
        std::env::remove_var("ZEST_TEST_LOADER_ANON_KEY");
    }

    #[tokio::test]
    async fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("user.toml"), "[backend\nurl = ").await.unwrap();

        let result = loader(&dir).load_files().await;
        assert!(matches!(result, Err(ZestError::Config(_))));
    }
}
