//! Workflow model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named grouping of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Workflow {
    /// Create a workflow record with a fresh id, stamped now
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Completion metrics of one workflow, derived from a task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub name: String,
    pub task_count: usize,
    pub completed_count: usize,
    /// Rounded percentage, 0 for a workflow without tasks
    pub completion_percentage: u32,
}

impl WorkflowSummary {
    pub fn is_complete(&self) -> bool {
        self.task_count > 0 && self.completed_count == self.task_count
    }
}
