//! Assistant command handler

use super::CliContext;
use crate::error::{Result, ZestError};
use colored::Colorize;
use tracing::error;

/// Ask the assistant one question.
///
/// Signed-in users call the function with their (refreshed) token, everyone
/// else with the anon key. Relay failures are logged and answered with the
/// configured fallback message; only bad input and a refused refresh are
/// returned as errors.
pub async fn handle_ask(ctx: &CliContext, message: String) -> Result<()> {
    let session = ctx.sessions.current(&ctx.client).await?;

    match ctx
        .client
        .invoke_chat(&ctx.config.assistant.function, session.as_ref(), &message)
        .await
    {
        Ok(text) => {
            println!("{}", "Assistant".cyan().bold());
            println!("{}", text);
            Ok(())
        }
        Err(e @ ZestError::InvalidInput(_)) => Err(e),
        Err(e) => {
            error!(error = %e, "Error calling assistant");
            println!("{}", "Assistant".cyan().bold());
            println!("{}", ctx.config.assistant.fallback_message);
            Ok(())
        }
    }
}
