//! Workflow repository backed by the `workflows` table

use super::{ensure_session, logged, WorkflowStore};
use crate::backend::{BackendClient, Filter};
use crate::error::{Result, ZestError};
use crate::models::{Session, Workflow, WorkflowInsert};
use crate::validation::{validate_not_empty, validate_string_length};
use async_trait::async_trait;
use tracing::info;

const TABLE: &str = "workflows";

/// Repository for workflow rows
#[derive(Clone, Debug)]
pub struct RestWorkflowRepository {
    client: BackendClient,
}

impl RestWorkflowRepository {
    /// Create a new workflow repository
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn list_rows(&self, session: &Session) -> Result<Vec<Workflow>> {
        ensure_session(session)?;
        self.client
            .select(session, TABLE, "*", &[Filter::eq("user_id", session.user_id())])
            .await
    }

    async fn create_row(&self, session: &Session, name: &str, description: Option<&str>) -> Result<Workflow> {
        ensure_session(session)?;
        validate_not_empty(name, "name")?;
        validate_string_length(name, "name", 1, 255)?;

        let row = WorkflowInsert {
            name: name.to_string(),
            description: description.map(str::to_string),
            user_id: session.user_id().to_string(),
        };

        let workflow = self
            .client
            .insert::<_, Workflow>(session, TABLE, &row, "*")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ZestError::Decode("Workflow insert returned no rows".to_string()))?;

        info!(workflow_id = %workflow.id, name = %workflow.name, "Workflow created");
        Ok(workflow)
    }

    async fn find_row(&self, session: &Session, name: &str) -> Result<Option<Workflow>> {
        ensure_session(session)?;
        let rows: Vec<Workflow> = self
            .client
            .select(
                session,
                TABLE,
                "*",
                &[Filter::eq("user_id", session.user_id()), Filter::eq("name", name)],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl WorkflowStore for RestWorkflowRepository {
    async fn list(&self, session: &Session) -> Result<Vec<Workflow>> {
        logged("list workflows", self.list_rows(session).await)
    }

    async fn create(&self, session: &Session, name: &str, description: Option<&str>) -> Result<Workflow> {
        logged("create workflow", self.create_row(session, name, description).await)
    }

    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<Workflow>> {
        logged("find workflow", self.find_row(session, name).await)
    }
}
