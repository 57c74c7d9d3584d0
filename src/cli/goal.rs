//! Goal command implementations

use colored::Colorize;

use crate::cli::progress::with_spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::formatters::{format_datetime_local, glasses};

/// Run the goal get command
pub async fn get(ctx: &mut CommandContext, refresh: bool) -> Result<()> {
    let format = ctx.format;
    let goal = with_spinner("Fetching goal...", format, ctx.tracker.refresh_goal(refresh)).await?;

    match format {
        OutputFormat::Json => ctx.print_json(&goal)?,
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", "Daily Goal".bold());
            println!();
            println!("  Goal:    {}", glasses(goal.goal_amount));
            println!("  Updated: {}", format_datetime_local(&goal.updated_at));
        }
    }

    Ok(())
}

/// Run the goal set command
pub async fn set(ctx: &mut CommandContext, amount: u32) -> Result<()> {
    let format = ctx.format;
    let goal = with_spinner("Updating goal...", format, ctx.tracker.set_goal(amount)).await?;

    match format {
        OutputFormat::Json => ctx.print_json(&goal)?,
        OutputFormat::Pretty | OutputFormat::Table => {
            println!(
                "{} Daily goal set to {}",
                "✓".green(),
                glasses(goal.goal_amount).bold()
            );
        }
    }

    Ok(())
}
