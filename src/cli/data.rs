//! Local data management commands

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::{OutputFormat, context};
use crate::config::Config;
use crate::error::Result;
use crate::mirror::{LocalMirror, MirrorStorage};

/// Clear all locally stored logs and the local goal
pub fn clear(opts: &GlobalOptions, yes: bool) -> Result<()> {
    let config = Config::load_or_default_at(opts.config_ref())?;
    let format = context::resolve_format(opts.format, &config);

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete all water logs stored on this machine?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Nothing deleted.");
            return Ok(());
        }
    }

    let removed = LocalMirror::open()?.reset()?;
    log::debug!("Removed {} local log(s)", removed);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "logs_removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{} Cleared {} local log(s)", "✓".green(), removed);
        }
    }

    Ok(())
}

/// Print the local data directory
pub fn path() -> Result<()> {
    println!("{}", MirrorStorage::data_dir()?.display());
    Ok(())
}
