//! CLI command implementations
//!
//! Provides command handlers for the zest CLI binary.

pub mod assistant;
pub mod auth;
pub mod session;
pub mod stats;
pub mod task;
pub mod workflow;

pub use session::SessionStore;

use crate::backend::BackendClient;
use crate::config::{self, ZestConfig};
use crate::error::Result;
use crate::models::Session;
use crate::repositories::{RestTaskRepository, RestWorkflowRepository, TaskStore, WorkflowStore};
use std::sync::Arc;

/// Everything a command handler needs
#[derive(Clone)]
pub struct CliContext {
    pub config: ZestConfig,
    pub client: BackendClient,
    pub sessions: SessionStore,
    pub tasks: Arc<dyn TaskStore>,
    pub workflows: Arc<dyn WorkflowStore>,
}

impl CliContext {
    /// Build a context talking to the configured backend
    pub fn from_config(config: ZestConfig) -> Result<Self> {
        config.validate()?;

        let client = BackendClient::from_config(&config.backend)?;
        let sessions = SessionStore::new(config.session_path()?);

        Ok(Self {
            tasks: Arc::new(RestTaskRepository::new(client.clone())),
            workflows: Arc::new(RestWorkflowRepository::new(client.clone())),
            config,
            client,
            sessions,
        })
    }

    /// Load configuration from the standard locations and build a context
    pub async fn load() -> Result<Self> {
        Self::from_config(config::load_config().await?)
    }

    /// The signed-in session, or `NotAuthenticated`
    pub async fn session(&self) -> Result<Session> {
        self.sessions.require(&self.client).await
    }
}

/// Shorten `text` to `max` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
