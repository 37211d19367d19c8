//! Task repository backed by the `tasks` table

use super::{ensure_session, logged, TaskStore, WorkflowStore};
use crate::backend::{BackendClient, Filter, JOINED_TASK_SELECT};
use crate::error::{Result, ZestError};
use crate::models::{
    NewTask, Session, StatusPatch, Task, TaskInsert, TaskPatch, TaskRow, TaskStatus, TaskUpdate,
};
use crate::repositories::RestWorkflowRepository;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

const TABLE: &str = "tasks";

/// Repository for task rows
#[derive(Clone, Debug)]
pub struct RestTaskRepository {
    client: BackendClient,
    workflows: RestWorkflowRepository,
}

impl RestTaskRepository {
    /// Create a new task repository
    pub fn new(client: BackendClient) -> Self {
        let workflows = RestWorkflowRepository::new(client.clone());
        Self { client, workflows }
    }

    /// Resolve a workflow name to its id among the user's workflows
    async fn resolve_workflow_id(&self, session: &Session, name: Option<&str>) -> Result<Option<String>> {
        let Some(name) = name else {
            return Ok(None);
        };

        match self.workflows.find_by_name(session, name).await? {
            Some(workflow) => Ok(Some(workflow.id)),
            None => Err(ZestError::NotFound(format!("Workflow not found: {}", name))),
        }
    }

    async fn create_row(&self, session: &Session, task: NewTask) -> Result<Task> {
        ensure_session(session)?;
        task.validate()?;

        let workflow_id = self.resolve_workflow_id(session, task.workflow.as_deref()).await?;
        let row = TaskInsert::new(&task, session.user_id(), workflow_id);

        let stored: TaskRow = self
            .client
            .insert::<_, TaskRow>(session, TABLE, &row, JOINED_TASK_SELECT)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ZestError::Decode("Task insert returned no rows".to_string()))?;

        let mut created = stored.into_task(Utc::now(), task.tags);
        if created.workflow.is_none() {
            created.workflow = task.workflow;
        }

        info!(task_id = %created.id, title = %created.title, "Task created");
        Ok(created)
    }

    async fn get_row(&self, session: &Session, id: &str) -> Result<Task> {
        ensure_session(session)?;

        let rows: Vec<TaskRow> = self
            .client
            .select(session, TABLE, JOINED_TASK_SELECT, &[Filter::eq("id", id)])
            .await?;

        rows.into_iter()
            .next()
            .map(|row| row.into_task(Utc::now(), Vec::new()))
            .ok_or_else(|| ZestError::NotFound(format!("Task not found: {}", id)))
    }

    async fn patch_row(&self, session: &Session, id: &str, update: &TaskUpdate) -> Result<TaskRow> {
        let workflow_id = self.resolve_workflow_id(session, update.workflow.as_deref()).await?;
        let patch = TaskPatch::new(update, workflow_id, Utc::now());

        let rows: Vec<TaskRow> = self
            .client
            .update(session, TABLE, &patch, &[Filter::eq("id", id)], JOINED_TASK_SELECT)
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| ZestError::NotFound(format!("Task not found: {}", id)))
    }

    async fn update_status_row(&self, session: &Session, id: &str, status: TaskStatus) -> Result<()> {
        ensure_session(session)?;
        self.client
            .update_minimal(session, TABLE, &StatusPatch { status }, &[Filter::eq("id", id)])
            .await?;

        info!(task_id = %id, status = %status, "Task status updated");
        Ok(())
    }

    async fn update_row(&self, session: &Session, id: &str, update: TaskUpdate) -> Result<Task> {
        ensure_session(session)?;
        update.validate()?;

        let row = self.patch_row(session, id, &update).await?;
        let mut updated = row.into_task(Utc::now(), update.tags.unwrap_or_default());
        if updated.workflow.is_none() {
            updated.workflow = update.workflow;
        }

        info!(task_id = %id, "Task updated");
        Ok(updated)
    }

    async fn delete_row(&self, session: &Session, id: &str) -> Result<()> {
        ensure_session(session)?;
        self.client.delete(session, TABLE, &[Filter::eq("id", id)]).await?;

        info!(task_id = %id, "Task deleted");
        Ok(())
    }

    async fn list_rows(&self, session: &Session) -> Result<Vec<Task>> {
        ensure_session(session)?;

        let rows: Vec<TaskRow> = self
            .client
            .select(
                session,
                TABLE,
                JOINED_TASK_SELECT,
                &[Filter::eq("user_id", session.user_id())],
            )
            .await?;

        let now = Utc::now();
        debug!(count = rows.len(), "Fetched tasks");
        Ok(rows.into_iter().map(|row| row.into_task(now, Vec::new())).collect())
    }

    async fn insert_rows(&self, session: &Session, tasks: Vec<NewTask>) -> Result<usize> {
        ensure_session(session)?;
        if tasks.is_empty() {
            return Ok(0);
        }

        let mut rows = Vec::with_capacity(tasks.len());
        for task in &tasks {
            task.validate()?;
            let workflow_id = self.resolve_workflow_id(session, task.workflow.as_deref()).await?;
            rows.push(TaskInsert::new(task, session.user_id(), workflow_id));
        }

        self.client.insert_minimal(session, TABLE, &rows).await?;

        info!(count = rows.len(), "Tasks inserted");
        Ok(rows.len())
    }
}

#[async_trait]
impl TaskStore for RestTaskRepository {
    async fn create(&self, session: &Session, task: NewTask) -> Result<Task> {
        logged("create task", self.create_row(session, task).await)
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Task> {
        logged("get task", self.get_row(session, id).await)
    }

    async fn update_status(&self, session: &Session, id: &str, status: TaskStatus) -> Result<()> {
        logged("update task status", self.update_status_row(session, id, status).await)
    }

    async fn update(&self, session: &Session, id: &str, update: TaskUpdate) -> Result<Task> {
        logged("update task", self.update_row(session, id, update).await)
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        logged("delete task", self.delete_row(session, id).await)
    }

    async fn list(&self, session: &Session) -> Result<Vec<Task>> {
        logged("list tasks", self.list_rows(session).await)
    }

    async fn insert_many(&self, session: &Session, tasks: Vec<NewTask>) -> Result<usize> {
        logged("insert tasks", self.insert_rows(session, tasks).await)
    }
}
