//! Task command handlers

use super::{truncate, CliContext};
use crate::error::{Result, ZestError};
use crate::filter::TaskFilter;
use crate::models::{NewTask, Priority, Task, TaskStatus, TaskUpdate};
use crate::sample::sample_tasks;
use crate::validation::parse_tags;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use colored::{ColoredString, Colorize};
use tracing::info;

/// Fields accepted by `task add`
#[derive(Debug, Clone, Default)]
pub struct AddTaskArgs {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due: Option<String>,
    pub workflow: Option<String>,
    pub tags: Option<String>,
}

/// Fields accepted by `task update`
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due: Option<String>,
    pub workflow: Option<String>,
    pub tags: Option<String>,
}

/// Parse a due date given as RFC 3339 or as a plain `YYYY-MM-DD` (midnight UTC)
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            ZestError::InvalidInput(format!(
                "Invalid due date '{}' (expected YYYY-MM-DD or RFC 3339)",
                input
            ))
        })
}

impl AddTaskArgs {
    fn into_new_task(self) -> Result<NewTask> {
        let mut task = NewTask::new(self.title);
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        if let Some(priority) = self.priority {
            task = task.with_priority(priority);
        }
        if let Some(status) = self.status {
            task = task.with_status(status);
        }
        if let Some(due) = self.due {
            task = task.with_due_date(parse_due_date(&due)?);
        }
        if let Some(workflow) = self.workflow {
            task = task.with_workflow(workflow);
        }
        if let Some(tags) = self.tags {
            task = task.with_tags(parse_tags(&tags));
        }
        Ok(task)
    }
}

impl UpdateTaskArgs {
    fn into_update(self) -> Result<TaskUpdate> {
        Ok(TaskUpdate {
            title: self.title,
            description: self.description,
            due_date: self.due.as_deref().map(parse_due_date).transpose()?,
            priority: self.priority,
            status: self.status,
            workflow: self.workflow,
            tags: self.tags.as_deref().map(parse_tags),
        })
    }
}

pub(crate) fn colored_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.as_str().red().bold(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().blue(),
    }
}

pub(crate) fn colored_status(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Pending => status.as_str().normal(),
        TaskStatus::InProgress => status.as_str().cyan(),
        TaskStatus::Completed => status.as_str().green(),
    }
}

/// Print tasks as a table
pub(crate) fn print_task_table(tasks: &[&Task]) {
    println!(
        "{:<38} {:<32} {:<8} {:<12} {:<12} {:<16}",
        "ID", "Title", "Priority", "Status", "Due", "Workflow"
    );
    println!("{}", "-".repeat(122));

    for task in tasks {
        println!(
            "{:<38} {:<32} {:<8} {:<12} {:<12} {:<16}",
            task.id,
            truncate(&task.title, 32),
            colored_priority(task.priority),
            colored_status(task.status),
            task.due_date.format("%Y-%m-%d"),
            task.workflow.as_deref().unwrap_or("-"),
        );
    }
}

fn print_task(task: &Task) {
    println!("  ID:          {}", task.id);
    println!("  Title:       {}", task.title);
    if !task.description.is_empty() {
        println!("  Description: {}", task.description);
    }
    println!("  Priority:    {}", colored_priority(task.priority));
    println!("  Status:      {}", colored_status(task.status));
    println!("  Due:         {}", task.due_date.format("%Y-%m-%d %H:%M UTC"));
    if let Some(workflow) = &task.workflow {
        println!("  Workflow:    {}", workflow);
    }
    if !task.tags.is_empty() {
        println!("  Tags:        {}", task.tags.join(", "));
    }
}

/// Handle task add command
pub async fn handle_add(ctx: &CliContext, args: AddTaskArgs) -> Result<()> {
    let session = ctx.session().await?;
    let task = ctx.tasks.create(&session, args.into_new_task()?).await?;

    println!("{}", "✓ Task created successfully".green().bold());
    print_task(&task);

    Ok(())
}

/// Handle task list command
pub async fn handle_list(ctx: &CliContext, filter: TaskFilter) -> Result<()> {
    let session = ctx.session().await?;
    let tasks = ctx.tasks.list(&session).await?;
    let shown = filter.apply(&tasks, Utc::now());

    if shown.is_empty() {
        println!("{}", "No tasks found with the current filters".yellow());
        return Ok(());
    }

    print_task_table(&shown);
    println!();
    println!("{} of {} tasks", shown.len(), tasks.len());

    Ok(())
}

/// Handle task show command
pub async fn handle_show(ctx: &CliContext, id: String) -> Result<()> {
    let session = ctx.session().await?;
    let task = ctx.tasks.get(&session, &id).await?;

    print_task(&task);
    Ok(())
}

/// Handle task status command
pub async fn handle_status(ctx: &CliContext, id: String, status: TaskStatus) -> Result<()> {
    let session = ctx.session().await?;
    ctx.tasks.update_status(&session, &id, status).await?;

    println!("{} {}", "✓ Task status set to".green(), colored_status(status));
    Ok(())
}

/// Handle task update command
pub async fn handle_update(ctx: &CliContext, id: String, args: UpdateTaskArgs) -> Result<()> {
    let session = ctx.session().await?;
    let task = ctx.tasks.update(&session, &id, args.into_update()?).await?;

    println!("{}", "✓ Task updated successfully".green().bold());
    print_task(&task);

    Ok(())
}

/// Handle task delete command
pub async fn handle_delete(ctx: &CliContext, id: String) -> Result<()> {
    let session = ctx.session().await?;

    info!(task_id = %id, "Deleting task");
    ctx.tasks.delete(&session, &id).await?;

    println!("{}", "✓ Task deleted".green());
    Ok(())
}

/// Handle seed command
pub async fn handle_seed(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    let count = ctx.tasks.insert_many(&session, sample_tasks(Utc::now())).await?;

    println!("{} {} sample tasks", "✓ Added".green().bold(), count);
    Ok(())
}
