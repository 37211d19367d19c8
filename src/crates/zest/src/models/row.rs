//! Backend row shapes and their mapping to the domain types
//!
//! Rows mirror the `tasks` and `workflows` tables column for column. Task
//! rows fetched with the workflow join carry an embedded `workflows { name }`
//! object instead of the workflow name itself.

use super::task::{NewTask, Priority, Task, TaskStatus, TaskUpdate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Embedded workflow object returned by `select=*,workflows(name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowName {
    pub name: String,
}

/// A row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows: Option<WorkflowName>,
}

impl TaskRow {
    /// Map the row to a task.
    ///
    /// A missing due date becomes `now` and missing enum columns take the
    /// form defaults. The workflow name comes from the join when present.
    pub fn into_task(self, now: DateTime<Utc>, tags: Vec<String>) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            due_date: self.due_date.unwrap_or(now),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            workflow: self.workflows.map(|w| w.name),
            tags,
        }
    }
}

/// Insert payload for the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInsert {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub workflow_id: Option<String>,
    pub user_id: String,
}

impl TaskInsert {
    pub fn new(task: &NewTask, user_id: &str, workflow_id: Option<String>) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            workflow_id,
            user_id: user_id.to_string(),
        }
    }
}

/// Partial update payload for the `tasks` table; unset columns are omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TaskPatch {
    pub fn new(update: &TaskUpdate, workflow_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: update.title.clone(),
            description: update.description.clone(),
            priority: update.priority,
            status: update.status,
            due_date: update.due_date,
            workflow_id,
            updated_at: now,
        }
    }
}

/// Single-column status update for the `tasks` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusPatch {
    pub status: TaskStatus,
}

/// Insert payload for the `workflows` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowInsert {
    pub name: String,
    pub description: Option<String>,
    pub user_id: String,
}
