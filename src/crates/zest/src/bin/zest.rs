//! Zest CLI - task and workflow manager
//!
//! Main entry point for the zest command-line tool.

use clap::{Args, Parser, Subcommand};
use zest::cli::task::{AddTaskArgs, UpdateTaskArgs};
use zest::cli::{self, CliContext};
use zest::{DueWindow, Priority, TaskFilter, TaskStatus};

#[derive(Parser)]
#[command(name = "zest")]
#[command(about = "Zest - manage tasks and workflows from the terminal", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login(Credentials),

    /// Create an account
    Signup(Credentials),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Task management commands
    #[command(subcommand)]
    Task(TaskCommands),

    /// Workflow management commands
    #[command(subcommand)]
    Workflow(WorkflowCommands),

    /// Show today's and upcoming tasks with headline numbers
    Dashboard,

    /// Show task counts by status, priority and workflow
    Stats {
        /// Print the figures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add the twelve sample tasks to your account
    Seed,

    /// Ask the assistant a question
    Ask {
        /// Message to send
        message: String,
    },
}

#[derive(Args)]
struct Credentials {
    /// Account email
    #[arg(short, long)]
    email: String,
    /// Account password
    #[arg(short, long, env = "ZEST_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Create a new task
    Add {
        /// Task title (at least 2 characters)
        title: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority: high, medium (default), low
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Status: pending (default), in-progress, completed
        #[arg(short, long)]
        status: Option<TaskStatus>,
        /// Due date: YYYY-MM-DD or RFC 3339 (default: now)
        #[arg(long)]
        due: Option<String>,
        /// Workflow name
        #[arg(short, long)]
        workflow: Option<String>,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// List tasks
    List {
        /// Search title, description and tags
        #[arg(short = 'q', long, default_value = "")]
        search: String,
        /// Only this priority
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Only this status
        #[arg(short, long)]
        status: Option<TaskStatus>,
        /// Only this workflow
        #[arg(short, long)]
        workflow: Option<String>,
        /// Due window: all, today, week, month, upcoming
        #[arg(long, default_value = "all")]
        due: DueWindow,
    },
    /// Show task details
    Show {
        /// Task ID
        id: String,
    },
    /// Set a task's status
    Status {
        /// Task ID
        id: String,
        /// New status: pending, in-progress, completed
        status: TaskStatus,
    },
    /// Mark a task completed
    Done {
        /// Task ID
        id: String,
    },
    /// Update task fields
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<Priority>,
        /// New status
        #[arg(short, long)]
        status: Option<TaskStatus>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
        /// Move to this workflow
        #[arg(short, long)]
        workflow: Option<String>,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Subcommand)]
enum WorkflowCommands {
    /// Create a new workflow
    Create {
        /// Workflow name
        name: String,
        /// Workflow description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List workflows with completion figures
    List,
    /// Show a workflow's active and completed tasks
    Show {
        /// Workflow name
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let Some(command) = args.command else {
        println!("zest {}", zest::VERSION);
        println!("\nUse --help to see available commands");
        return Ok(());
    };

    let ctx = CliContext::load().await?;

    match command {
        Commands::Login(creds) => cli::auth::handle_login(&ctx, creds.email, creds.password).await?,
        Commands::Signup(creds) => cli::auth::handle_signup(&ctx, creds.email, creds.password).await?,
        Commands::Logout => cli::auth::handle_logout(&ctx).await?,
        Commands::Whoami => cli::auth::handle_whoami(&ctx).await?,
        Commands::Task(task_cmd) => match task_cmd {
            TaskCommands::Add { title, description, priority, status, due, workflow, tags } => {
                let args = AddTaskArgs { title, description, priority, status, due, workflow, tags };
                cli::task::handle_add(&ctx, args).await?;
            }
            TaskCommands::List { search, priority, status, workflow, due } => {
                let filter = TaskFilter {
                    search,
                    priority,
                    status,
                    workflow,
                    window: due,
                };
                cli::task::handle_list(&ctx, filter).await?;
            }
            TaskCommands::Show { id } => cli::task::handle_show(&ctx, id).await?,
            TaskCommands::Status { id, status } => cli::task::handle_status(&ctx, id, status).await?,
            TaskCommands::Done { id } => {
                cli::task::handle_status(&ctx, id, TaskStatus::Completed).await?;
            }
            TaskCommands::Update { id, title, description, priority, status, due, workflow, tags } => {
                let args = UpdateTaskArgs { title, description, priority, status, due, workflow, tags };
                cli::task::handle_update(&ctx, id, args).await?;
            }
            TaskCommands::Delete { id } => cli::task::handle_delete(&ctx, id).await?,
        },
        Commands::Workflow(workflow_cmd) => match workflow_cmd {
            WorkflowCommands::Create { name, description } => {
                cli::workflow::handle_create(&ctx, name, description).await?;
            }
            WorkflowCommands::List => cli::workflow::handle_list(&ctx).await?,
            WorkflowCommands::Show { name } => cli::workflow::handle_show(&ctx, name).await?,
        },
        Commands::Dashboard => cli::stats::handle_dashboard(&ctx).await?,
        Commands::Stats { json } => cli::stats::handle_stats(&ctx, json).await?,
        Commands::Seed => cli::task::handle_seed(&ctx).await?,
        Commands::Ask { message } => cli::assistant::handle_ask(&ctx, message).await?,
    }

    Ok(())
}
