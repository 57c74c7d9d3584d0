//! Hydrate CLI - track water intake, daily goals and streaks

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod mirror;
mod models;
mod output;
mod reminder;
mod session;
mod tracker;

use cli::args::GlobalOptions;
use cli::auth::RegisterArgs;
use cli::remind::SettingsUpdate;
use cli::{Cli, CommandContext, Commands, DataCommands, GoalCommands, RemindCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    log::debug!("Debug mode enabled");

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Register {
            email,
            password,
            reminder_frequency,
            active_hours_start,
            active_hours_end,
        } => {
            cli::auth::register(
                &opts,
                RegisterArgs {
                    email,
                    password,
                    reminder_frequency,
                    active_hours_start,
                    active_hours_end,
                },
            )
            .await
        }
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Log { amount, notes } => {
            let mut ctx = CommandContext::new(&opts)?;
            cli::water::log(&mut ctx, amount, notes).await
        }
        Commands::Today { refresh } => {
            let mut ctx = CommandContext::new(&opts)?;
            cli::water::today(&mut ctx, refresh).await
        }
        Commands::Streak { refresh } => {
            let mut ctx = CommandContext::new(&opts)?;
            cli::water::streak(&mut ctx, refresh).await
        }
        Commands::Goal(goal_cmd) => {
            let mut ctx = CommandContext::new(&opts)?;
            match goal_cmd {
                GoalCommands::Get { refresh } => cli::goal::get(&mut ctx, refresh).await,
                GoalCommands::Set { amount } => cli::goal::set(&mut ctx, amount).await,
            }
        }
        Commands::History { range } => {
            let mut ctx = CommandContext::new(&opts)?;
            cli::water::history(&mut ctx, &range).await
        }
        Commands::Stats { period } => {
            let mut ctx = CommandContext::new(&opts)?;
            cli::water::stats(&mut ctx, period.into()).await
        }
        Commands::Remind(remind_cmd) => match remind_cmd {
            RemindCommands::Run { once } => {
                let mut ctx = CommandContext::new(&opts)?;
                cli::remind::run(&mut ctx, once).await
            }
            RemindCommands::Settings {
                enable,
                disable,
                frequency,
                start,
                end,
            } => cli::remind::settings(
                &opts,
                SettingsUpdate {
                    enable,
                    disable,
                    frequency,
                    start,
                    end,
                },
            ),
            RemindCommands::History { clear } => cli::remind::history(&opts, clear),
        },
        Commands::Data(data_cmd) => match data_cmd {
            DataCommands::Clear { yes } => cli::data::clear(&opts, yes),
            DataCommands::Path => cli::data::path(),
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
