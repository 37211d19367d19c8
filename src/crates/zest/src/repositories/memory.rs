//! In-memory task and workflow store
//!
//! Mirrors the backend's observable behaviour: rows are scoped to the
//! session's user, ids are assigned on insert, workflow names are resolved
//! through the stored workflow id and tags are never persisted.

use super::{ensure_session, TaskStore, WorkflowStore};
use crate::error::{Result, ZestError};
use crate::models::{NewTask, Session, Task, TaskStatus, TaskUpdate, Workflow};
use crate::validation::{validate_not_empty, validate_string_length};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thread-safe in-memory store implementing both [`TaskStore`] and [`WorkflowStore`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<StoredTask>,
    workflows: Vec<StoredWorkflow>,
}

#[derive(Debug, Clone)]
struct StoredTask {
    user_id: String,
    workflow_id: Option<String>,
    task: Task,
}

#[derive(Debug, Clone)]
struct StoredWorkflow {
    user_id: String,
    workflow: Workflow,
}

impl MemoryState {
    fn workflow_id(&self, user_id: &str, name: Option<&str>) -> Result<Option<String>> {
        let Some(name) = name else {
            return Ok(None);
        };

        self.workflows
            .iter()
            .find(|w| w.user_id == user_id && w.workflow.name == name)
            .map(|w| Some(w.workflow.id.clone()))
            .ok_or_else(|| ZestError::NotFound(format!("Workflow not found: {}", name)))
    }

    fn workflow_name(&self, workflow_id: Option<&str>) -> Option<String> {
        let id = workflow_id?;
        self.workflows
            .iter()
            .find(|w| w.workflow.id == id)
            .map(|w| w.workflow.name.clone())
    }

    /// Read a stored task the way a joined select returns it
    fn joined(&self, stored: &StoredTask) -> Task {
        Task {
            workflow: self.workflow_name(stored.workflow_id.as_deref()),
            ..stored.task.clone()
        }
    }

    fn find_mut(&mut self, user_id: &str, id: &str) -> Result<&mut StoredTask> {
        self.tasks
            .iter_mut()
            .find(|t| t.user_id == user_id && t.task.id == id)
            .ok_or_else(|| ZestError::NotFound(format!("Task not found: {}", id)))
    }

    fn insert(&mut self, user_id: &str, task: NewTask) -> Result<StoredTask> {
        let workflow_id = self.workflow_id(user_id, task.workflow.as_deref())?;
        let mut stored_task = task.into_task(Uuid::new_v4().to_string());
        stored_task.tags.clear();

        let stored = StoredTask {
            user_id: user_id.to_string(),
            workflow_id,
            task: stored_task,
        };
        self.tasks.push(stored.clone());
        Ok(stored)
    }
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks across all users
    pub async fn task_count(&self) -> usize {
        self.state.read().await.tasks.len()
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn create(&self, session: &Session, task: NewTask) -> Result<Task> {
        ensure_session(session)?;
        task.validate()?;

        let tags = task.tags.clone();
        let mut state = self.state.write().await;
        let stored = state.insert(session.user_id(), task)?;

        Ok(Task {
            tags,
            ..state.joined(&stored)
        })
    }

    async fn get(&self, session: &Session, id: &str) -> Result<Task> {
        ensure_session(session)?;

        let state = self.state.read().await;
        state
            .tasks
            .iter()
            .find(|t| t.user_id == session.user_id() && t.task.id == id)
            .map(|t| state.joined(t))
            .ok_or_else(|| ZestError::NotFound(format!("Task not found: {}", id)))
    }

    async fn update_status(&self, session: &Session, id: &str, status: TaskStatus) -> Result<()> {
        ensure_session(session)?;

        let mut state = self.state.write().await;
        if let Ok(stored) = state.find_mut(session.user_id(), id) {
            stored.task.status = status;
        }
        Ok(())
    }

    async fn update(&self, session: &Session, id: &str, update: TaskUpdate) -> Result<Task> {
        ensure_session(session)?;
        update.validate()?;

        let mut state = self.state.write().await;
        let workflow_id = state.workflow_id(session.user_id(), update.workflow.as_deref())?;

        let stored = state.find_mut(session.user_id(), id)?;
        update.apply_to(&mut stored.task);
        stored.task.tags.clear();
        if workflow_id.is_some() {
            stored.workflow_id = workflow_id;
        }
        let stored = stored.clone();

        Ok(Task {
            tags: update.tags.unwrap_or_default(),
            ..state.joined(&stored)
        })
    }

    async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        ensure_session(session)?;

        let mut state = self.state.write().await;
        state
            .tasks
            .retain(|t| !(t.user_id == session.user_id() && t.task.id == id));
        Ok(())
    }

    async fn list(&self, session: &Session) -> Result<Vec<Task>> {
        ensure_session(session)?;

        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.user_id == session.user_id())
            .map(|t| state.joined(t))
            .collect())
    }

    async fn insert_many(&self, session: &Session, tasks: Vec<NewTask>) -> Result<usize> {
        ensure_session(session)?;
        for task in &tasks {
            task.validate()?;
        }

        let mut state = self.state.write().await;
        for task in &tasks {
            state.workflow_id(session.user_id(), task.workflow.as_deref())?;
        }

        let count = tasks.len();
        for task in tasks {
            state.insert(session.user_id(), task)?;
        }
        Ok(count)
    }
}

#[async_trait]
impl WorkflowStore for InMemoryStore {
    async fn list(&self, session: &Session) -> Result<Vec<Workflow>> {
        ensure_session(session)?;

        let state = self.state.read().await;
        Ok(state
            .workflows
            .iter()
            .filter(|w| w.user_id == session.user_id())
            .map(|w| w.workflow.clone())
            .collect())
    }

    async fn create(&self, session: &Session, name: &str, description: Option<&str>) -> Result<Workflow> {
        ensure_session(session)?;
        validate_not_empty(name, "name")?;
        validate_string_length(name, "name", 1, 255)?;

        let workflow = Workflow::new(name, description.map(str::to_string));
        self.state.write().await.workflows.push(StoredWorkflow {
            user_id: session.user_id().to_string(),
            workflow: workflow.clone(),
        });
        Ok(workflow)
    }

    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<Workflow>> {
        ensure_session(session)?;

        let state = self.state.read().await;
        Ok(state
            .workflows
            .iter()
            .find(|w| w.user_id == session.user_id() && w.workflow.name == name)
            .map(|w| w.workflow.clone()))
    }
}
