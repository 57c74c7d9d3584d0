//! Command execution context
//!
//! Loads the config once, resolves the output format and picks the backend
//! for the water tracker: the API when signed in, the local mirror otherwise.

use chrono::Utc;
use serde::Serialize;

use crate::cache::CachedWaterClient;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::HydrateClient;
use crate::config::Config;
use crate::error::Result;
use crate::mirror::LocalMirror;
use crate::output::json;
use crate::tracker::{Backend, WaterTracker};

/// Context for command execution containing config, tracker, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    /// Water state over the chosen backend
    pub tracker: WaterTracker<HydrateClient>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Uses the API when a valid session exists and `--offline` is not set,
    /// and the local mirror otherwise.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or the chosen backend
    /// cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default_at(opts.config_ref())?;
        let format = resolve_format(opts.format, &config);
        let backend = backend_for(opts, &config)?;

        Ok(Self {
            config,
            format,
            tracker: WaterTracker::new(backend),
        })
    }

    pub fn is_offline(&self) -> bool {
        self.tracker.is_offline()
    }

    /// Print `data` wrapped with JSON metadata
    pub fn print_json<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        println!("{}", json::format_json_from(data, self.is_offline())?);
        Ok(())
    }
}

/// Flag or env wins, then the stored preference, then pretty.
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(OutputFormat::from_preference)
    })
    .unwrap_or_default()
}

/// Flag or env wins, then the config file, then the default host.
pub fn api_host<'a>(opts: &'a GlobalOptions, config: &'a Config) -> &'a str {
    opts.api_host_ref().unwrap_or_else(|| config.api_host())
}

/// Unauthenticated client for register and login
pub fn anonymous_client(opts: &GlobalOptions, config: &Config) -> Result<HydrateClient> {
    Ok(HydrateClient::new(api_host(opts, config), None)?)
}

fn backend_for(opts: &GlobalOptions, config: &Config) -> Result<Backend<HydrateClient>> {
    if opts.offline {
        log::debug!("Offline mode requested, using local storage");
        return Ok(Backend::Local(LocalMirror::open()?));
    }

    if !config.has_session(Utc::now()) {
        if config.token.is_some() {
            log::warn!("Session expired, using local storage. Run `hydrate login` to sign in.");
        } else {
            log::debug!("Not signed in, using local storage");
        }
        return Ok(Backend::Local(LocalMirror::open()?));
    }

    let host = api_host(opts, config);
    log::debug!("Using API at {}", host);
    let client = HydrateClient::new(host, config.token.clone())?;
    Ok(Backend::Remote(CachedWaterClient::new(client, !opts.no_cache)))
}
