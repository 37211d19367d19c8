//! Domain models
//!
//! - [`Task`], [`NewTask`], [`TaskUpdate`] with [`Priority`] and [`TaskStatus`]
//! - [`Workflow`] and the derived [`WorkflowSummary`]
//! - [`User`] and [`Session`]
//! - Row shapes exchanged with the backend ([`row`])

pub mod row;
pub mod task;
pub mod user;
pub mod workflow;

pub use row::{StatusPatch, TaskInsert, TaskPatch, TaskRow, WorkflowInsert, WorkflowName};
pub use task::{NewTask, Priority, Task, TaskStatus, TaskUpdate};
pub use user::{Session, User};
pub use workflow::{Workflow, WorkflowSummary};
