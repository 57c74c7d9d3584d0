//! Configuration management for Hydrate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::DEFAULT_API_HOST;
use crate::client::models::{AuthToken, User};
use crate::error::{ConfigError, Result};
use crate::reminder::ReminderSettings;

/// Tokens this close to expiry are treated as expired
const EXPIRY_BUFFER_MINUTES: i64 = 5;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API host (scheme and authority), defaults to a local server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Bearer token from the last login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<AuthToken>,

    /// Profile of the signed-in user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Reminder settings
    #[serde(default)]
    pub reminders: ReminderSettings,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".hydrate").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path` or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration, treating a missing file as an empty configuration
    pub fn load_or_default_at(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to `path` or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Configured API host or the default
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// Check if the token is missing or will expire soon (within 5 minutes).
    ///
    /// Tokens that carry no readable expiry are assumed valid until the
    /// server rejects them.
    pub fn is_token_expired(&self, now: DateTime<Utc>) -> bool {
        match &self.token {
            None => true,
            Some(token) => match token.expires_at() {
                Some(expires_at) => {
                    expires_at - chrono::Duration::minutes(EXPIRY_BUFFER_MINUTES) < now
                }
                None => false,
            },
        }
    }

    /// Whether requests can be made as a signed-in user
    pub fn has_session(&self, now: DateTime<Utc>) -> bool {
        !self.is_token_expired(now)
    }
}
