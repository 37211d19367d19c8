//! Workflow command handlers

use super::task::print_task_table;
use super::CliContext;
use crate::error::{Result, ZestError};
use crate::stats::{split_by_completion, summarize_workflow};
use colored::Colorize;

/// Handle workflow create command
pub async fn handle_create(ctx: &CliContext, name: String, description: Option<String>) -> Result<()> {
    let session = ctx.session().await?;
    let workflow = ctx
        .workflows
        .create(&session, &name, description.as_deref())
        .await?;

    println!("{}", "✓ Workflow created successfully".green().bold());
    println!("  ID: {}", workflow.id);
    println!("  Name: {}", workflow.name);
    if let Some(description) = &workflow.description {
        println!("  Description: {}", description);
    }

    Ok(())
}

/// Handle workflow list command
pub async fn handle_list(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    let workflows = ctx.workflows.list(&session).await?;

    if workflows.is_empty() {
        println!("{}", "No workflows found".yellow());
        return Ok(());
    }

    let tasks = ctx.tasks.list(&session).await?;

    println!("{:<24} {:>6} {:>10} {:>8}", "Name", "Tasks", "Completed", "Done");
    println!("{}", "-".repeat(51));

    for workflow in &workflows {
        let summary = summarize_workflow(&workflow.name, &tasks);
        let pct = format!("{}%", summary.completion_percentage);
        println!(
            "{:<24} {:>6} {:>10} {:>8}",
            workflow.name,
            summary.task_count,
            summary.completed_count,
            if summary.is_complete() { pct.green() } else { pct.normal() }
        );
    }

    Ok(())
}

/// Handle workflow show command
pub async fn handle_show(ctx: &CliContext, name: String) -> Result<()> {
    let session = ctx.session().await?;
    let workflow = ctx
        .workflows
        .find_by_name(&session, &name)
        .await?
        .ok_or_else(|| ZestError::NotFound(format!("Workflow not found: {}", name)))?;

    let tasks: Vec<_> = ctx
        .tasks
        .list(&session)
        .await?
        .into_iter()
        .filter(|t| t.workflow.as_deref() == Some(workflow.name.as_str()))
        .collect();
    let summary = summarize_workflow(&workflow.name, &tasks);
    let (active, completed) = split_by_completion(&tasks);

    println!("{}", workflow.name.bold());
    if let Some(description) = &workflow.description {
        println!("{}", description);
    }
    println!(
        "{} of {} tasks completed ({}%)",
        summary.completed_count, summary.task_count, summary.completion_percentage
    );

    println!();
    println!("{}", "Active".bold());
    if active.is_empty() {
        println!("{}", "  No active tasks".yellow());
    } else {
        print_task_table(&active);
    }

    println!();
    println!("{}", "Completed".bold());
    if completed.is_empty() {
        println!("{}", "  No completed tasks".yellow());
    } else {
        print_task_table(&completed);
    }

    Ok(())
}
