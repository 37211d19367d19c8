//! Repository layer for task and workflow storage
//!
//! The [`TaskStore`] and [`WorkflowStore`] traits are the seam between the
//! CLI and storage. [`RestTaskRepository`] and [`RestWorkflowRepository`]
//! talk to the hosted backend; [`InMemoryStore`] keeps everything in
//! process for tests and offline use.
//!
//! Every operation takes the caller's [`Session`] explicitly and only sees
//! that user's rows.

pub mod memory;
pub mod task_repository;
pub mod workflow_repository;

pub use memory::InMemoryStore;
pub use task_repository::RestTaskRepository;
pub use workflow_repository::RestWorkflowRepository;

use crate::error::{Result, ZestError};
use crate::models::{NewTask, Session, Task, TaskStatus, TaskUpdate, Workflow};
use async_trait::async_trait;

/// Task storage operations
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task and return the stored record with its assigned id.
    ///
    /// A workflow name is resolved among the user's workflows; an unknown
    /// name is a [`ZestError::NotFound`]. Tags are echoed from the input.
    async fn create(&self, session: &Session, task: NewTask) -> Result<Task>;

    /// Fetch one task by id
    async fn get(&self, session: &Session, id: &str) -> Result<Task>;

    /// Change only the status column; a missing id is not an error
    async fn update_status(&self, session: &Session, id: &str, status: TaskStatus) -> Result<()>;

    /// Apply a partial update and return the updated record
    async fn update(&self, session: &Session, id: &str, update: TaskUpdate) -> Result<Task>;

    /// Remove a task; removing a missing id is not an error
    async fn delete(&self, session: &Session, id: &str) -> Result<()>;

    /// All of the user's tasks, with workflow names and empty tags
    async fn list(&self, session: &Session) -> Result<Vec<Task>>;

    /// Insert several tasks at once, returning how many were inserted
    async fn insert_many(&self, session: &Session, tasks: Vec<NewTask>) -> Result<usize>;
}

/// Workflow storage operations
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// All of the user's workflows
    async fn list(&self, session: &Session) -> Result<Vec<Workflow>>;

    /// Create a workflow
    async fn create(&self, session: &Session, name: &str, description: Option<&str>) -> Result<Workflow>;

    /// Look a workflow up by exact name
    async fn find_by_name(&self, session: &Session, name: &str) -> Result<Option<Workflow>>;
}

/// Reject calls made with an empty session
pub(crate) fn ensure_session(session: &Session) -> Result<()> {
    if session.access_token.is_empty() || session.user.id.is_empty() {
        return Err(ZestError::NotAuthenticated);
    }
    Ok(())
}

/// Log a failed operation before handing the error back
pub(crate) fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::error!(operation, error = %e, "Operation failed");
    }
    result
}
