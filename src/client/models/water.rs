//! Water log models

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Default number of units recorded by a single log
pub const DEFAULT_LOG_AMOUNT: u32 = 1;

/// Largest amount accepted for a single log
pub const MAX_LOG_AMOUNT: u32 = 100;

/// A single water intake event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    pub id: String,
    pub user_id: String,

    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Units consumed (glasses)
    pub amount: u32,

    #[serde(default)]
    pub notes: Option<String>,
}

impl WaterLog {
    /// UTC calendar day the log belongs to
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Payload for logging water
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLogCreate {
    pub amount: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl WaterLogCreate {
    /// Build a log request; an amount of zero counts as one unit.
    pub fn new(amount: u32, notes: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            amount: normalize_amount(amount),
            notes: notes.filter(|n| !n.trim().is_empty()),
            timestamp,
        }
    }
}

/// Sum of log amounts, saturating at `u32::MAX`
pub fn total_amount(logs: &[WaterLog]) -> u32 {
    logs.iter()
        .fold(0u32, |total, log| total.saturating_add(log.amount))
}

/// Zero-unit logs are recorded as a single unit, matching the API.
pub fn normalize_amount(amount: u32) -> u32 {
    if amount == 0 { DEFAULT_LOG_AMOUNT } else { amount }
}

/// All logs for one calendar day with their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWaterLog {
    pub date: NaiveDate,
    pub total_amount: u32,
    pub logs: Vec<WaterLog>,
}

impl DailyWaterLog {
    /// A day with nothing logged
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_amount: 0,
            logs: Vec::new(),
        }
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Create a range, returning `None` when `start_date` is after `end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }

    /// The `days` most recent days ending at `today` (at least one day).
    ///
    /// `None` when the first day would fall outside the supported calendar.
    pub fn last_days(today: NaiveDate, days: u32) -> Option<Self> {
        let span = u64::from(days.max(1) - 1);
        let start_date = today.checked_sub_days(Days::new(span))?;
        Some(Self {
            start_date,
            end_date: today,
        })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Every day in the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }

    /// Number of days in the range
    pub fn len(&self) -> usize {
        (self.end_date - self.start_date).num_days() as usize + 1
    }
}
