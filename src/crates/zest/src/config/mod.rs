//! Configuration management
//!
//! TOML configuration with user-level and project-level files plus
//! environment overrides.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    AssistantConfig, AssistantLayer, BackendConfig, BackendLayer, ConfigLayer, SessionConfig, ZestConfig,
    ASSISTANT_FALLBACK_MESSAGE,
};

use crate::error::Result;

/// Load configuration from the standard locations
pub async fn load_config() -> Result<ZestConfig> {
    ConfigLoader::new()?.load().await
}
