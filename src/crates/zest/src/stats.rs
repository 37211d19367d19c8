//! Dashboard and statistics figures derived from a task list

use crate::filter::DueWindow;
use crate::models::{Priority, Task, TaskStatus, WorkflowSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rounded percentage of `part` in `whole`; 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Headline numbers shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub due_today: usize,
    pub high_priority: usize,
    pub completion_rate: u32,
}

impl DashboardStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed()).count();

        Self {
            total: tasks.len(),
            completed,
            due_today: tasks
                .iter()
                .filter(|t| DueWindow::Today.contains(t.due_date, now))
                .count(),
            high_priority: tasks.iter().filter(|t| t.priority == Priority::High).count(),
            completion_rate: percentage(completed, tasks.len()),
        }
    }
}

/// Task counts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusBreakdown {
    pub fn compute(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut acc, task| {
            match task.status {
                TaskStatus::Pending => acc.pending += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Completed => acc.completed += 1,
            }
            acc
        })
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Task counts per priority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn compute(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut acc, task| {
            match task.priority {
                Priority::High => acc.high += 1,
                Priority::Medium => acc.medium += 1,
                Priority::Low => acc.low += 1,
            }
            acc
        })
    }

    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Task counts per workflow name; tasks without a workflow are left out
pub fn tasks_by_workflow(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for name in tasks.iter().filter_map(|t| t.workflow.as_ref()) {
        *counts.entry(name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Completion metrics for one workflow
pub fn summarize_workflow(name: &str, tasks: &[Task]) -> WorkflowSummary {
    let in_workflow: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.workflow.as_deref() == Some(name))
        .collect();
    let completed_count = in_workflow.iter().filter(|t| t.is_completed()).count();

    WorkflowSummary {
        name: name.to_string(),
        task_count: in_workflow.len(),
        completed_count,
        completion_percentage: percentage(completed_count, in_workflow.len()),
    }
}

/// Completion metrics for every workflow referenced by `tasks`, by name
pub fn workflow_summaries(tasks: &[Task]) -> Vec<WorkflowSummary> {
    tasks_by_workflow(tasks)
        .keys()
        .map(|name| summarize_workflow(name, tasks))
        .collect()
}

/// Split tasks into (active, completed)
pub fn split_by_completion(tasks: &[Task]) -> (Vec<&Task>, Vec<&Task>) {
    tasks.iter().partition(|t| !t.is_completed())
}
