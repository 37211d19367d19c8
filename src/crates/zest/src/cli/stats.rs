//! Dashboard and statistics command handlers

use super::task::{colored_priority, colored_status, print_task_table};
use super::CliContext;
use crate::error::Result;
use crate::filter::{DueWindow, TaskFilter};
use crate::models::{Priority, TaskStatus};
use crate::stats::{tasks_by_workflow, DashboardStats, PriorityBreakdown, StatusBreakdown};
use chrono::Utc;
use colored::Colorize;

/// Handle dashboard command
pub async fn handle_dashboard(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    let tasks = ctx.tasks.list(&session).await?;
    let now = Utc::now();
    let stats = DashboardStats::compute(&tasks, now);

    println!("{}", "Dashboard".bold());
    println!("==================");
    println!("Total tasks:    {}", stats.total);
    println!("Completed:      {} ({}%)", stats.completed, stats.completion_rate);
    println!("Due today:      {}", stats.due_today);
    println!("High priority:  {}", stats.high_priority);

    let today = TaskFilter::new().with_window(DueWindow::Today).apply(&tasks, now);
    println!();
    println!("{}", "Today".bold());
    if today.is_empty() {
        println!("{}", "  Nothing due today".yellow());
    } else {
        print_task_table(&today);
    }

    let upcoming = TaskFilter::new().with_window(DueWindow::Upcoming).apply(&tasks, now);
    println!();
    println!("{}", "Upcoming (next 7 days)".bold());
    if upcoming.is_empty() {
        println!("{}", "  Nothing upcoming".yellow());
    } else {
        print_task_table(&upcoming);
    }

    Ok(())
}

/// Handle stats command
pub async fn handle_stats(ctx: &CliContext, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let tasks = ctx.tasks.list(&session).await?;

    let status = StatusBreakdown::compute(&tasks);
    let priority = PriorityBreakdown::compute(&tasks);
    let workflows = tasks_by_workflow(&tasks);

    if json {
        let report = serde_json::json!({
            "dashboard": DashboardStats::compute(&tasks, Utc::now()),
            "status": status,
            "priority": priority,
            "workflows": workflows,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "By status".bold());
    for s in TaskStatus::ALL {
        println!("  {:<12} {:>4}", colored_status(s), status.get(s));
    }

    println!();
    println!("{}", "By priority".bold());
    for p in Priority::ALL {
        println!("  {:<12} {:>4}", colored_priority(p), priority.get(p));
    }

    println!();
    println!("{}", "By workflow".bold());
    if workflows.is_empty() {
        println!("{}", "  No tasks are assigned to a workflow".yellow());
    }
    for (name, count) in &workflows {
        println!("  {:<24} {:>4}", name, count);
    }

    Ok(())
}
