//! # Zest - task and workflow manager
//!
//! Zest keeps a user's tasks and workflows in a hosted backend (GoTrue auth,
//! PostgREST tables, edge functions) and derives dashboard figures from them.
//!
//! ## Features
//!
//! - **Explicit sessions** - every data call takes the caller's [`Session`]
//! - **Task CRUD** - create, read, partial update, status update, delete
//! - **Workflows** - named task groups with completion metrics
//! - **Filtering** - search, exact field matches and due-date windows
//! - **Statistics** - dashboard counts and per-status/priority/workflow breakdowns
//! - **Assistant** - one-shot chat through the `chat` edge function
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zest::{BackendClient, NewTask, Priority, RestTaskRepository, TaskStore};
//! use std::time::Duration;
//!
//! # async fn example() -> zest::Result<()> {
//! let client = BackendClient::new("https://abcd.supabase.co", "anon-key", Duration::from_secs(30))?;
//! let session = client.sign_in_with_password("sam@example.com", "secret").await?;
//!
//! let tasks = RestTaskRepository::new(client);
//! let task = tasks
//!     .create(&session, NewTask::new("Pay Bills").with_priority(Priority::High))
//!     .await?;
//! println!("created {}", task.id);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod filter;
pub mod models;
pub mod repositories;
pub mod sample;
pub mod stats;
pub mod validation;

mod error;

pub use error::{Result, ZestError};

pub use backend::{BackendClient, SignUpOutcome};
pub use config::{load_config, ConfigLoader, ZestConfig};
pub use filter::{DueWindow, TaskFilter};
pub use models::{NewTask, Priority, Session, Task, TaskStatus, TaskUpdate, User, Workflow, WorkflowSummary};
pub use repositories::{InMemoryStore, RestTaskRepository, RestWorkflowRepository, TaskStore, WorkflowStore};
pub use sample::sample_tasks;
pub use stats::{DashboardStats, PriorityBreakdown, StatusBreakdown};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
