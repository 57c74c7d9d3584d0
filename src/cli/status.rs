//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::api_host;
use crate::config::Config;
use crate::error::Result;
use crate::mirror::{LocalMirror, MirrorStorage};

/// Run the status command to display session and storage status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Hydrate Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(_) => {
            println!("{} Configuration not found", "○".dimmed());
            println!("  → Run '{}' to sign in", "hydrate login".cyan());
            Config::default()
        }
    };
    println!();

    let now = Utc::now();
    match &config.token {
        Some(token) if config.has_session(now) => match token.expires_at() {
            Some(expires) => {
                let remaining = expires.signed_duration_since(now);
                println!(
                    "{} Signed in (expires in {}h {}m)",
                    "✓".green(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
            None => println!("{} Signed in", "✓".green()),
        },
        Some(_) => {
            println!("{} Session expired", "⚠".yellow());
            println!("  → Run '{}' to sign in again", "hydrate login".cyan());
        }
        None => println!("{} Not signed in (using local storage)", "○".dimmed()),
    }

    if let Some(user) = &config.user {
        println!("{} Account: {}", "✓".green(), user.email);
    }

    if opts.offline {
        println!("{} Offline mode forced by --offline", "○".dimmed());
    }

    let host = api_host(opts, &config);
    if host != crate::client::DEFAULT_API_HOST {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    let reminders = config.reminders.for_user(config.user.as_ref());
    if reminders.enabled {
        println!(
            "{} Reminders every {} min between {}:00 and {}:00",
            "✓".green(),
            reminders.frequency_minutes,
            reminders.active_hours_start,
            reminders.active_hours_end
        );
    } else {
        println!("{} Reminders disabled", "○".dimmed());
    }

    match MirrorStorage::data_dir() {
        Ok(dir) => {
            let count = LocalMirror::open().and_then(|mirror| mirror.log_count());
            match count {
                Ok(count) => println!(
                    "{} Local storage: {} ({} logs)",
                    "○".dimmed(),
                    dir.display(),
                    count
                ),
                Err(e) => println!("{} Local storage unavailable: {}", "⚠".yellow(), e),
            }
        }
        Err(e) => println!("{} Local storage unavailable: {}", "⚠".yellow(), e),
    }

    println!();
    Ok(())
}
