//! Session persistence for the CLI

use crate::backend::BackendClient;
use crate::error::{Result, ZestError};
use crate::models::Session;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Stores the signed-in session as JSON on disk
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any
    pub async fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    /// Write the session, creating the parent directory when needed
    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(session)?).await?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the stored session
    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }

    /// The stored session, refreshed first when its token has expired.
    ///
    /// `Ok(None)` only when nobody is signed in; a refresh the backend
    /// refuses is `NotAuthenticated`.
    pub async fn current(&self, client: &BackendClient) -> Result<Option<Session>> {
        match self.load().await? {
            Some(session) => self.refreshed(client, session).await.map(Some),
            None => Ok(None),
        }
    }

    /// Like [`SessionStore::current`], with no session being `NotAuthenticated`
    pub async fn require(&self, client: &BackendClient) -> Result<Session> {
        self.current(client).await?.ok_or(ZestError::NotAuthenticated)
    }

    async fn refreshed(&self, client: &BackendClient, session: Session) -> Result<Session> {
        if !session.is_expired(Utc::now()) {
            return Ok(session);
        }

        info!("Access token expired, refreshing session");
        match client.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.save(&refreshed).await?;
                Ok(refreshed)
            }
            // GoTrue answers a revoked or unknown refresh token with 400
            Err(e) if e.is_auth_error() || matches!(e, ZestError::Backend { status: 400, .. }) => {
                info!(error = %e, "Session refresh refused");
                Err(ZestError::NotAuthenticated)
            }
            Err(e) => Err(e),
        }
    }
}
