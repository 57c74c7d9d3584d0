//! Offline mirror of the water API
//!
//! Used when there is no signed-in session. Every operation returns the same
//! types, field sets and totals as the matching API call, computed from logs
//! kept in local SQLite storage.

pub mod aggregate;
pub mod storage;

use chrono::{DateTime, Utc};

use crate::client::models::{
    DEFAULT_GOAL_AMOUNT, DailyWaterLog, DateRange, Goal, StatsPeriod, Streak, WaterLog,
    WaterStats, normalize_amount,
};
use crate::error::StoreError;

pub use aggregate::LOCAL_ID;
pub use storage::MirrorStorage;

type Result<T> = std::result::Result<T, StoreError>;

/// Local stand-in for the water API
pub struct LocalMirror {
    storage: MirrorStorage,
}

impl LocalMirror {
    pub fn new(storage: MirrorStorage) -> Self {
        Self { storage }
    }

    /// Open the mirror at the default data location
    pub fn open() -> Result<Self> {
        Ok(Self::new(MirrorStorage::open()?))
    }

    /// Number of logs recorded locally
    pub fn log_count(&self) -> Result<usize> {
        self.storage.log_count()
    }

    /// Record an intake event at `now`.
    pub fn log_water(
        &self,
        amount: u32,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<WaterLog> {
        let log = WaterLog {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: LOCAL_ID.to_string(),
            timestamp: now,
            amount: normalize_amount(amount),
            notes: notes.filter(|n| !n.trim().is_empty()),
        };
        self.storage.insert_log(&log)?;
        log::debug!("Logged {} locally", log.amount);
        Ok(log)
    }

    /// Logs for the UTC day containing `now`
    pub fn today_logs(&self, now: DateTime<Utc>) -> Result<DailyWaterLog> {
        let today = now.date_naive();
        let logs = self.storage.logs_between(today, today)?;
        Ok(aggregate::daily_log(today, logs))
    }

    pub fn streak(&self, now: DateTime<Utc>) -> Result<Streak> {
        let days = self.storage.logged_days()?;
        Ok(aggregate::streak(&days, now))
    }

    /// Stored goal, persisting the default on first read.
    pub fn goal(&self, now: DateTime<Utc>) -> Result<Goal> {
        let (goal_amount, updated_at) = match self.storage.goal()? {
            Some(stored) => stored,
            None => {
                self.storage.set_goal(DEFAULT_GOAL_AMOUNT, now)?;
                (DEFAULT_GOAL_AMOUNT, now)
            }
        };
        Ok(local_goal(goal_amount, updated_at))
    }

    pub fn set_goal(&self, goal_amount: u32, now: DateTime<Utc>) -> Result<Goal> {
        if goal_amount == 0 {
            return Err(StoreError::Invalid("goal must be at least 1".to_string()));
        }
        self.storage.set_goal(goal_amount, now)?;
        Ok(local_goal(goal_amount, now))
    }

    /// One entry per day in the range, oldest first.
    pub fn history(&self, range: &DateRange) -> Result<Vec<DailyWaterLog>> {
        if range.start_date > range.end_date {
            return Err(StoreError::Invalid(format!(
                "start date {} is after end date {}",
                range.start_date, range.end_date
            )));
        }
        let logs = self.storage.logs_between(range.start_date, range.end_date)?;
        Ok(aggregate::history(range, logs))
    }

    /// Per-day totals for the period containing `now`.
    pub fn stats(&self, period: StatsPeriod, now: DateTime<Utc>) -> Result<WaterStats> {
        let range = period.bounds(now.date_naive());
        let logs = self.storage.logs_between(range.start_date, range.end_date)?;
        Ok(aggregate::stats(period, &range, &logs))
    }

    /// Delete all local data, returning the number of logs removed.
    pub fn reset(&self) -> Result<usize> {
        self.storage.clear_all()
    }
}

fn local_goal(goal_amount: u32, updated_at: DateTime<Utc>) -> Goal {
    Goal {
        goal_amount,
        id: LOCAL_ID.to_string(),
        user_id: LOCAL_ID.to_string(),
        updated_at,
    }
}
