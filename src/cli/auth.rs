//! Account commands: register, login, logout

use chrono::Utc;
use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::anonymous_client;
use crate::cli::progress::with_spinner;
use crate::cli::{OutputFormat, context};
use crate::client::models::UserCreate;
use crate::config::Config;
use crate::error::Result;
use crate::output::json;
use crate::session;

/// Options for `hydrate register`
pub struct RegisterArgs {
    pub email: Option<String>,
    pub password: Option<String>,
    pub reminder_frequency: Option<u32>,
    pub active_hours_start: Option<u32>,
    pub active_hours_end: Option<u32>,
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?),
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

fn format_of(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    context::resolve_format(opts.format, config)
}

/// Run the register command
pub async fn register(opts: &GlobalOptions, args: RegisterArgs) -> Result<()> {
    let mut config = Config::load_or_default_at(opts.config_ref())?;
    let format = format_of(opts, &config);
    let client = anonymous_client(opts, &config)?;

    let email = prompt_email(args.email)?;
    let password = prompt_password(args.password, true)?;
    let signup = UserCreate {
        email,
        password,
        reminder_frequency: args.reminder_frequency,
        active_hours_start: args.active_hours_start,
        active_hours_end: args.active_hours_end,
    };

    let user = with_spinner(
        "Creating account...",
        format,
        session::register(&client, &mut config, &signup),
    )
    .await?;
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }
    config.save_at(opts.config_ref())?;

    match format {
        OutputFormat::Json => println!("{}", json::format_json(&user)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{} Account created for {}", "✓".green(), user.email.bold());
            println!("\nSign in with {}", "hydrate login".cyan());
        }
    }

    Ok(())
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut config = Config::load_or_default_at(opts.config_ref())?;
    let format = format_of(opts, &config);
    let client = anonymous_client(opts, &config)?;

    let email = prompt_email(email)?;
    let password = prompt_password(password, false)?;

    let user = with_spinner(
        "Signing in...",
        format,
        session::login(&client, &mut config, &email, &password, Utc::now()),
    )
    .await?;
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    match format {
        OutputFormat::Json => println!("{}", json::format_json(&user)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{} Signed in as {}", "✓".green(), user.email.bold());
            println!("  Session saved to: {}", config_path.display());
            println!("\n{}", "You're all set! Try running:".bold());
            println!("  {} - Log a glass of water", "hydrate log".cyan());
            println!("  {} - Show today's progress", "hydrate today".cyan());
        }
    }

    Ok(())
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Not signed in", "○".dimmed());
            return Ok(());
        }
    };

    if session::logout(&mut config) {
        config.save_at(opts.config_ref())?;
        println!("{} Signed out", "✓".green());
    } else {
        println!("{} Not signed in", "○".dimmed());
    }

    Ok(())
}
