//! Reminder commands: run, settings, history

use std::time::Duration;

use chrono::{Local, Timelike};
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, context};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::ReminderDisplay;
use crate::output::Formattable;
use crate::output::json;
use crate::reminder::{ReminderHistory, ReminderSchedule, ReminderSettings, reminder_message};

/// How often the loop checks whether a reminder is due
const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Changes requested by `hydrate remind settings`
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub enable: bool,
    pub disable: bool,
    pub frequency: Option<u32>,
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        !self.enable
            && !self.disable
            && self.frequency.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// Apply to `settings`, rejecting combinations that fail validation.
    fn apply(&self, settings: &ReminderSettings) -> Result<ReminderSettings> {
        let mut updated = settings.clone();
        if self.enable {
            updated.enabled = true;
        }
        if self.disable {
            updated.enabled = false;
        }
        if let Some(frequency) = self.frequency {
            updated.frequency_minutes = frequency;
        }
        if let Some(start) = self.start {
            updated.active_hours_start = start;
        }
        if let Some(end) = self.end {
            updated.active_hours_end = end;
        }
        updated.validate().map_err(Error::InvalidInput)?;
        Ok(updated)
    }
}

/// Fetch progress and print one reminder.
async fn deliver(ctx: &mut CommandContext) -> Result<String> {
    let today = ctx.tracker.refresh_today_logs(true).await?;
    let goal = ctx.tracker.refresh_goal(false).await?;
    Ok(reminder_message(&today, &goal))
}

/// Run the reminder loop until Ctrl+C (or after one check with `once`)
pub async fn run(ctx: &mut CommandContext, once: bool) -> Result<()> {
    let settings = ctx.config.reminders.for_user(ctx.config.user.as_ref());
    settings.validate().map_err(Error::InvalidInput)?;

    if !settings.enabled {
        println!(
            "{} Reminders are disabled. Enable them with {}",
            "○".dimmed(),
            "hydrate remind settings --enable".cyan()
        );
        return Ok(());
    }

    let history_path = ReminderHistory::default_path()?;
    let mut history = ReminderHistory::load(&history_path)?;
    let mut schedule = ReminderSchedule::new(settings, history.last_sent());

    if !once {
        println!(
            "Reminding every {} min between {}:00 and {}:00. Press Ctrl+C to stop.",
            schedule.settings().frequency_minutes,
            schedule.settings().active_hours_start,
            schedule.settings().active_hours_end
        );
    }

    let mut interval = tokio::time::interval(CHECK_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = ctx.tracker.now();
                let hour = now.with_timezone(&Local).hour();

                if schedule.is_due(hour, now) {
                    match deliver(ctx).await {
                        Ok(message) => {
                            println!("\x07{} {}", "💧".blue(), message.bold());
                            history.add(now, true);
                            schedule.mark_sent(now);
                        }
                        Err(e) => {
                            log::warn!("Failed to deliver reminder: {}", e);
                            history.add(now, false);
                        }
                    }
                    history.save(&history_path)?;
                } else {
                    log::debug!("No reminder due at {}", now);
                }

                if once {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nReminders stopped.");
                break;
            }
        }
    }

    Ok(())
}

/// Show or change reminder settings
pub fn settings(opts: &GlobalOptions, update: SettingsUpdate) -> Result<()> {
    let mut config = Config::load_or_default_at(opts.config_ref())?;
    let format = context::resolve_format(opts.format, &config);

    if !update.is_empty() {
        config.reminders = update.apply(&config.reminders)?;
        config.save_at(opts.config_ref())?;
        log::debug!("Saved reminder settings: {:?}", config.reminders);
    }

    // Profile preferences win when signed in
    let effective = config.reminders.for_user(config.user.as_ref());

    match format {
        OutputFormat::Json => println!("{}", json::format_json(&effective)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            if !update.is_empty() {
                println!("{} Reminder settings updated\n", "✓".green());
            }
            println!("{}", "Reminder Settings".bold());
            println!();
            let state = if effective.enabled {
                "enabled".green()
            } else {
                "disabled".red()
            };
            println!("  Status:       {}", state);
            println!("  Frequency:    every {} min", effective.frequency_minutes);
            println!(
                "  Active hours: {}:00 - {}:00",
                effective.active_hours_start, effective.active_hours_end
            );
            if effective != config.reminders {
                println!("\n  {}", "(from your account preferences)".dimmed());
            }
        }
    }

    Ok(())
}

/// Show or clear delivered reminders
pub fn history(opts: &GlobalOptions, clear: bool) -> Result<()> {
    let config = Config::load_or_default_at(opts.config_ref())?;
    let format = context::resolve_format(opts.format, &config);
    let path = ReminderHistory::default_path()?;
    let mut history = ReminderHistory::load(&path)?;

    if clear {
        let count = history.entries().len();
        history.clear();
        history.save(&path)?;
        println!("{} Cleared {} reminder(s)", "✓".green(), count);
        return Ok(());
    }

    history
        .entries()
        .iter()
        .map(ReminderDisplay::from)
        .collect::<Vec<_>>()
        .print(format)
}
