//! Auth command handlers

use super::CliContext;
use crate::backend::SignUpOutcome;
use crate::error::Result;
use colored::Colorize;
use tracing::info;

/// Handle login command
pub async fn handle_login(ctx: &CliContext, email: String, password: String) -> Result<()> {
    let session = ctx.client.sign_in_with_password(&email, &password).await?;
    ctx.sessions.save(&session).await?;

    println!("{}", "✓ Signed in".green().bold());
    println!("  User: {}", session.user.email.as_deref().unwrap_or(&session.user.id));

    Ok(())
}

/// Handle signup command
pub async fn handle_signup(ctx: &CliContext, email: String, password: String) -> Result<()> {
    match ctx.client.sign_up(&email, &password).await? {
        SignUpOutcome::SignedIn(session) => {
            ctx.sessions.save(&session).await?;
            println!("{}", "✓ Account created and signed in".green().bold());
        }
        SignUpOutcome::ConfirmationPending(user) => {
            println!("{}", "✓ Account created".green().bold());
            println!(
                "  Check {} for a confirmation link, then run 'zest login'.",
                user.email.as_deref().unwrap_or(&email)
            );
        }
    }

    Ok(())
}

/// Handle logout command
pub async fn handle_logout(ctx: &CliContext) -> Result<()> {
    match ctx.sessions.load().await? {
        Some(session) => {
            if let Err(e) = ctx.client.sign_out(&session).await {
                info!(error = %e, "Server-side sign out failed, clearing local session anyway");
            }
            ctx.sessions.clear().await?;
            println!("{}", "✓ Signed out".green());
        }
        None => println!("{}", "Not signed in".yellow()),
    }

    Ok(())
}

/// Handle whoami command
pub async fn handle_whoami(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    let user = ctx.client.get_user(&session).await?;

    println!("ID:    {}", user.id);
    println!("Email: {}", user.email.as_deref().unwrap_or("N/A"));

    Ok(())
}
