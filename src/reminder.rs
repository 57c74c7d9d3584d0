//! Hydration reminders
//!
//! Settings live in the config file. The schedule decides when a reminder is
//! due, and the history records what was delivered, newest first.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::models::{DailyWaterLog, Goal, User};
use crate::error::{Result, StoreError};

/// Delivered reminders kept on disk
const MAX_HISTORY: usize = 50;

/// History file name inside the data directory
const HISTORY_FILE: &str = "reminders.json";

/// When and how often to remind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    pub enabled: bool,

    /// Minimum minutes between reminders
    pub frequency_minutes: u32,

    /// First local hour (0-23) reminders may fire
    pub active_hours_start: u32,

    /// Local hour (0-23) reminders stop
    pub active_hours_end: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_minutes: 120,
            active_hours_start: 9,
            active_hours_end: 21,
        }
    }
}

impl ReminderSettings {
    /// Settings with the user's stored preferences applied on top.
    ///
    /// Preferences that would produce invalid settings are ignored as a whole.
    pub fn for_user(&self, user: Option<&User>) -> Self {
        let Some(user) = user else {
            return self.clone();
        };

        let merged = Self {
            enabled: self.enabled,
            frequency_minutes: user.reminder_frequency.unwrap_or(self.frequency_minutes),
            active_hours_start: user.active_hours_start.unwrap_or(self.active_hours_start),
            active_hours_end: user.active_hours_end.unwrap_or(self.active_hours_end),
        };
        match merged.validate() {
            Ok(()) => merged,
            Err(e) => {
                log::warn!("Ignoring account reminder preferences: {}", e);
                self.clone()
            }
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.frequency_minutes == 0 {
            return Err("frequency must be at least 1 minute".to_string());
        }
        if self.active_hours_start > 23 || self.active_hours_end > 24 {
            return Err("active hours must be between 0 and 24".to_string());
        }
        if self.active_hours_start >= self.active_hours_end {
            return Err("active hours must start before they end".to_string());
        }
        Ok(())
    }

    /// Whether `hour` falls in `[start, end)`
    pub fn in_active_hours(&self, hour: u32) -> bool {
        hour >= self.active_hours_start && hour < self.active_hours_end
    }
}

/// Tracks when the last reminder went out
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    settings: ReminderSettings,
    last_notification: Option<DateTime<Utc>>,
}

impl ReminderSchedule {
    pub fn new(settings: ReminderSettings, last_notification: Option<DateTime<Utc>>) -> Self {
        Self {
            settings,
            last_notification,
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    /// Whether a reminder should fire at `now`, whose local hour is `hour`.
    pub fn is_due(&self, hour: u32, now: DateTime<Utc>) -> bool {
        if !self.settings.enabled || !self.settings.in_active_hours(hour) {
            return false;
        }
        match self.last_notification {
            None => true,
            Some(last) => {
                now - last >= chrono::Duration::minutes(i64::from(self.settings.frequency_minutes))
            }
        }
    }

    pub fn mark_sent(&mut self, now: DateTime<Utc>) {
        self.last_notification = Some(now);
    }
}

/// One delivered (or failed) reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

/// Reminders sent so far, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderHistory {
    entries: Vec<ReminderEntry>,
}

impl ReminderHistory {
    /// Default history file (~/.local/share/hydrate/reminders.json on Linux)
    pub fn default_path() -> Result<PathBuf> {
        let data_base = dirs::data_dir().ok_or(StoreError::NoHome)?;
        Ok(data_base.join("hydrate").join(HISTORY_FILE))
    }

    /// Load history, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Record a reminder as the newest entry
    pub fn add(&mut self, timestamp: DateTime<Utc>, success: bool) -> &ReminderEntry {
        self.entries.insert(
            0,
            ReminderEntry {
                id: uuid::Uuid::new_v4().to_string(),
                timestamp,
                success,
            },
        );
        self.entries.truncate(MAX_HISTORY);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ReminderEntry] {
        &self.entries
    }

    /// Most recent successful reminder
    pub fn last_sent(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().find(|e| e.success).map(|e| e.timestamp)
    }
}

/// Notification text for the current progress
pub fn reminder_message(today: &DailyWaterLog, goal: &Goal) -> String {
    let remaining = goal.goal_amount.saturating_sub(today.total_amount);
    if remaining == 0 {
        format!(
            "Time to drink some water! Goal reached ({}/{}), keep it up.",
            today.total_amount, goal.goal_amount
        )
    } else {
        format!(
            "Time to drink some water! {}/{} glasses today, {} to go.",
            today.total_amount, goal.goal_amount, remaining
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 4, hour, minute, 0).unwrap()
    }

    fn user(frequency: Option<u32>, start: Option<u32>, end: Option<u32>) -> User {
        let mut user = User::placeholder("sam@example.com", at(8, 0));
        user.reminder_frequency = frequency;
        user.active_hours_start = start;
        user.active_hours_end = end;
        user
    }

    #[test]
    fn test_default_settings() {
        let settings = ReminderSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.frequency_minutes, 120);
        assert_eq!(
            (settings.active_hours_start, settings.active_hours_end),
            (9, 21)
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_user_preferences_override_when_present() {
        let settings = ReminderSettings::default().for_user(Some(&user(Some(60), None, Some(22))));
        assert_eq!(settings.frequency_minutes, 60);
        assert_eq!(settings.active_hours_start, 9);
        assert_eq!(settings.active_hours_end, 22);

        assert_eq!(
            ReminderSettings::default().for_user(None),
            ReminderSettings::default()
        );
    }

    #[test]
    fn test_user_preferences_allow_midnight_start() {
        let settings = ReminderSettings::default().for_user(Some(&user(None, Some(0), Some(6))));
        assert_eq!(settings.active_hours_start, 0);
        assert_eq!(settings.active_hours_end, 6);
        assert!(settings.in_active_hours(0));
    }

    #[test]
    fn test_invalid_user_preferences_ignored() {
        // Profile start lands after the local end
        let settings = ReminderSettings::default().for_user(Some(&user(None, Some(22), None)));
        assert_eq!(settings, ReminderSettings::default());

        let settings = ReminderSettings::default().for_user(Some(&user(Some(0), None, None)));
        assert_eq!(settings, ReminderSettings::default());
    }

    #[test]
    fn test_validate() {
        let mut settings = ReminderSettings::default();
        settings.frequency_minutes = 0;
        assert!(settings.validate().is_err());

        let mut settings = ReminderSettings::default();
        settings.active_hours_start = 22;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_due_outside_active_hours() {
        let schedule = ReminderSchedule::new(ReminderSettings::default(), None);
        assert!(!schedule.is_due(8, at(8, 30)));
        assert!(schedule.is_due(9, at(9, 0)));
        assert!(!schedule.is_due(21, at(21, 0)));
    }

    #[test]
    fn test_due_respects_frequency() {
        let mut schedule = ReminderSchedule::new(ReminderSettings::default(), None);
        schedule.mark_sent(at(10, 0));

        assert!(!schedule.is_due(11, at(11, 59)));
        assert!(schedule.is_due(12, at(12, 0)));
    }

    #[test]
    fn test_disabled_never_due() {
        let settings = ReminderSettings {
            enabled: false,
            ..Default::default()
        };
        let schedule = ReminderSchedule::new(settings, None);
        assert!(!schedule.is_due(12, at(12, 0)));
    }

    #[test]
    fn test_history_newest_first() {
        let mut history = ReminderHistory::default();
        history.add(at(10, 0), true);
        history.add(at(12, 0), false);

        assert_eq!(history.entries()[0].timestamp, at(12, 0));
        assert!(!history.entries()[0].success);
        assert_eq!(history.last_sent(), Some(at(10, 0)));

        history.clear();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_history_capped() {
        let mut history = ReminderHistory::default();
        for minute in 0..(MAX_HISTORY as u32 + 5) {
            history.add(at(10, 0) + chrono::Duration::minutes(i64::from(minute)), true);
        }
        assert_eq!(history.entries().len(), MAX_HISTORY);
    }

    #[test]
    fn test_history_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HISTORY_FILE);

        let mut history = ReminderHistory::load(&path).unwrap();
        history.add(at(10, 0), true);
        history.save(&path).unwrap();

        let loaded = ReminderHistory::load(&path).unwrap();
        assert_eq!(loaded.entries(), history.entries());
    }

    #[test]
    fn test_reminder_message() {
        let today = DailyWaterLog {
            date: at(10, 0).date_naive(),
            total_amount: 3,
            logs: Vec::new(),
        };
        let goal = Goal {
            goal_amount: 8,
            id: "g".to_string(),
            user_id: "u".to_string(),
            updated_at: at(8, 0),
        };
        assert!(reminder_message(&today, &goal).contains("3/8"));
        assert!(reminder_message(&today, &goal).contains("5 to go"));
    }
}
