//! Water intake commands: log, today, streak, history, stats

use colored::Colorize;
use serde::Serialize;

use crate::cli::progress::with_spinner;
use crate::cli::{CommandContext, OutputFormat, RangeArgs};
use crate::client::models::{DailyWaterLog, Goal, StatsPeriod, Streak, WaterLog};
use crate::error::{Error, Result};
use crate::models::{DayDisplay, LogDisplay, StatDisplay};
use crate::output::Formattable;
use crate::output::formatters::{BAR_WIDTH, glasses, plural, progress_bar};
use crate::tracker::GoalProgress;

/// Today's logs with the goal, as emitted in JSON
#[derive(Serialize)]
struct TodayReport<'a> {
    today: &'a DailyWaterLog,
    goal: &'a Goal,
    progress: GoalProgress,
}

/// One-line progress summary, e.g. `3/8 glasses ██████░░░░ 37%`
fn progress_line(progress: &GoalProgress) -> String {
    let bar = progress_bar(progress.total_amount, progress.goal_amount, BAR_WIDTH);
    let bar = if progress.achieved {
        bar.green()
    } else {
        bar.cyan()
    };
    format!(
        "{}/{} glasses {} {}%",
        progress.total_amount,
        progress.goal_amount,
        bar,
        progress.percent()
    )
}

fn offline_note(ctx: &CommandContext) {
    if ctx.is_offline() && ctx.format.is_human() {
        eprintln!("{}", "(offline: using local storage)".dimmed());
    }
}

/// Run the log command
pub async fn log(ctx: &mut CommandContext, amount: u32, notes: Option<String>) -> Result<()> {
    let format = ctx.format;
    let logged: WaterLog = with_spinner(
        "Logging water...",
        format,
        ctx.tracker.log_water_intake(amount, notes),
    )
    .await?;
    ctx.tracker.refresh_goal(false).await?;

    match format {
        OutputFormat::Json => ctx.print_json(&logged)?,
        OutputFormat::Table => vec![LogDisplay::from(&logged)].print(format)?,
        OutputFormat::Pretty => {
            offline_note(ctx);
            println!("{} Logged {}", "✓".green(), glasses(logged.amount));
            if let Some(progress) = ctx.tracker.progress() {
                println!("  {}", progress_line(&progress));
                let before = progress.total_amount.saturating_sub(logged.amount);
                if progress.achieved && before < progress.goal_amount {
                    println!("  {}", "Daily goal reached!".green().bold());
                }
            }
        }
    }

    Ok(())
}

/// Run the today command
pub async fn today(ctx: &mut CommandContext, refresh: bool) -> Result<()> {
    let format = ctx.format;
    let tracker = &mut ctx.tracker;
    with_spinner("Fetching today's logs...", format, async move {
        if refresh {
            tracker.refresh_today_logs(true).await?;
            tracker.refresh_streak(true).await?;
            tracker.refresh_goal(true).await?;
            Ok::<(), Error>(())
        } else {
            tracker.load_initial().await
        }
    })
    .await?;

    let state = ctx.tracker.state();
    let (Some(today), Some(goal)) = (state.today_logs.clone(), state.goal.clone()) else {
        return Ok(());
    };
    let streak = state.streak.as_ref().map(|s| s.current_streak).unwrap_or(0);
    let progress = GoalProgress::new(today.total_amount, goal.goal_amount);

    match format {
        OutputFormat::Json => ctx.print_json(&TodayReport {
            today: &today,
            goal: &goal,
            progress,
        })?,
        OutputFormat::Table => today
            .logs
            .iter()
            .map(LogDisplay::from)
            .collect::<Vec<_>>()
            .print(format)?,
        OutputFormat::Pretty => {
            offline_note(ctx);
            println!("{} {}\n", "Today".bold(), today.date.to_string().dimmed());
            println!("  {}", progress_line(&progress));
            if progress.achieved {
                println!("  {}", "Daily goal reached!".green().bold());
            }
            if streak > 0 {
                println!("  🔥 {} streak", plural(streak, "day"));
            }
            if !today.logs.is_empty() {
                println!();
                today
                    .logs
                    .iter()
                    .map(LogDisplay::from)
                    .collect::<Vec<_>>()
                    .print(format)?;
            }
        }
    }

    Ok(())
}

/// Run the streak command
pub async fn streak(ctx: &mut CommandContext, refresh: bool) -> Result<()> {
    let format = ctx.format;
    let streak: Streak = with_spinner(
        "Fetching streak...",
        format,
        ctx.tracker.refresh_streak(refresh),
    )
    .await?;

    match format {
        OutputFormat::Json => ctx.print_json(&streak)?,
        OutputFormat::Pretty | OutputFormat::Table => {
            offline_note(ctx);
            let flame = if streak.current_streak > 0 { "🔥" } else { "○" };
            println!(
                "{} Current streak: {}",
                flame,
                plural(streak.current_streak, "day").bold()
            );
            println!("  Longest streak: {}", plural(streak.longest_streak, "day"));
            println!("  Last logged:    {}", streak.last_logged_date);
        }
    }

    Ok(())
}

/// Run the history command
pub async fn history(ctx: &mut CommandContext, range: &RangeArgs) -> Result<()> {
    let format = ctx.format;
    let range = range.resolve(ctx.tracker.now().date_naive())?;
    let days = with_spinner(
        "Fetching history...",
        format,
        ctx.tracker.fetch_history(&range),
    )
    .await?;

    match format {
        OutputFormat::Json => ctx.print_json(&days)?,
        OutputFormat::Pretty | OutputFormat::Table => {
            let goal = ctx.tracker.refresh_goal(false).await?;
            offline_note(ctx);
            if format == OutputFormat::Pretty {
                println!(
                    "{} {} to {}\n",
                    "History".bold(),
                    range.start_date,
                    range.end_date
                );
            }
            days.iter()
                .map(|day| DayDisplay::new(day, goal.goal_amount))
                .collect::<Vec<_>>()
                .print(format)?;
            if format == OutputFormat::Pretty {
                let met = days
                    .iter()
                    .filter(|d| d.total_amount >= goal.goal_amount)
                    .count();
                println!(
                    "\nGoal met on {} of {}",
                    met,
                    plural(range.len() as u32, "day")
                );
            }
        }
    }

    Ok(())
}

/// Run the stats command
pub async fn stats(ctx: &mut CommandContext, period: StatsPeriod) -> Result<()> {
    let format = ctx.format;
    let stats = with_spinner(
        "Fetching statistics...",
        format,
        ctx.tracker.fetch_stats(period),
    )
    .await?;

    match format {
        OutputFormat::Json => ctx.print_json(&stats)?,
        OutputFormat::Pretty | OutputFormat::Table => {
            let goal = ctx.tracker.refresh_goal(false).await?;
            offline_note(ctx);
            if format == OutputFormat::Pretty {
                println!("{} ({})\n", "Statistics".bold(), period);
            }
            stats
                .data
                .iter()
                .map(|point| StatDisplay::new(point, goal.goal_amount))
                .collect::<Vec<_>>()
                .print(format)?;
            if format == OutputFormat::Pretty {
                println!(
                    "\nTotal: {}  Daily average: {:.1}",
                    stats.total(),
                    stats.daily_average()
                );
            }
        }
    }

    Ok(())
}
