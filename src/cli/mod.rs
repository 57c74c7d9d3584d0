//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod completions;
pub mod context;
pub mod data;
pub mod goal;
pub mod progress;
pub mod remind;
pub mod status;
pub mod water;

pub use args::{OutputFormat, RangeArgs};
pub use context::CommandContext;

use crate::client::models::{MAX_GOAL_AMOUNT, MAX_LOG_AMOUNT, StatsPeriod};

/// Hydrate - track water intake, daily goals and streaks from the terminal
#[derive(Parser, Debug)]
#[command(name = "hydrate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "HYDRATE_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "HYDRATE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API host (e.g. http://localhost:8000)
    #[arg(long, global = true, env = "HYDRATE_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "HYDRATE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "HYDRATE_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Use local storage even when signed in
    #[arg(long, global = true, env = "HYDRATE_OFFLINE", hide_env = true)]
    pub offline: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register {
        /// Account email
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "HYDRATE_PASSWORD", hide = true, hide_env_values = true)]
        password: Option<String>,

        /// Minutes between reminders
        #[arg(long)]
        reminder_frequency: Option<u32>,

        /// First hour (0-23) reminders may fire
        #[arg(long)]
        active_hours_start: Option<u32>,

        /// Hour (0-23) reminders stop
        #[arg(long)]
        active_hours_end: Option<u32>,
    },

    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "HYDRATE_PASSWORD", hide = true, hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show session, storage and configuration status
    Status,

    /// Log water intake
    Log {
        /// Glasses consumed (0 counts as 1, at most 100)
        #[arg(
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_LOG_AMOUNT))
        )]
        amount: u32,

        /// Optional note
        #[arg(long, short = 'n')]
        notes: Option<String>,
    },

    /// Show today's logs and progress
    Today {
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Show the current and longest streak
    Streak {
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },

    /// View or change the daily goal
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show daily totals over a date range
    History {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Show per-day statistics for this week or month
    Stats {
        /// Aggregation period
        #[arg(long, short = 'p', value_enum, default_value_t = PeriodArg::Weekly)]
        period: PeriodArg,
    },

    /// Hydration reminders
    #[command(subcommand)]
    Remind(RemindCommands),

    /// Manage data stored on this machine for offline use
    #[command(subcommand)]
    Data(DataCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   hydrate completion bash > /etc/bash_completion.d/hydrate
  zsh:    hydrate completion zsh > \"${fpath[1]}/_hydrate\"
  fish:   hydrate completion fish > ~/.config/fish/completions/hydrate.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Show the daily goal
    Get {
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },

    /// Set the daily goal
    Set {
        /// Glasses per day (1 to 100)
        #[arg(value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_GOAL_AMOUNT)))]
        amount: u32,
    },
}

/// Reminder subcommands
#[derive(Subcommand, Debug)]
pub enum RemindCommands {
    /// Check once a minute and print a reminder when one is due
    Run {
        /// Check once and exit
        #[arg(long)]
        once: bool,
    },

    /// Show or change reminder settings
    Settings {
        /// Turn reminders on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Turn reminders off
        #[arg(long)]
        disable: bool,

        /// Minutes between reminders
        #[arg(long)]
        frequency: Option<u32>,

        /// First hour (0-23) reminders may fire
        #[arg(long)]
        start: Option<u32>,

        /// Hour (0-24) reminders stop
        #[arg(long)]
        end: Option<u32>,
    },

    /// Show delivered reminders
    History {
        /// Delete the history instead
        #[arg(long)]
        clear: bool,
    },
}

/// Local data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Delete every locally stored log and the local goal
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print the local data directory
    Path,
}

/// Stats period as a CLI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PeriodArg {
    Weekly,
    Monthly,
}

impl From<PeriodArg> for StatsPeriod {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Weekly => StatsPeriod::Weekly,
            PeriodArg::Monthly => StatsPeriod::Monthly,
        }
    }
}
