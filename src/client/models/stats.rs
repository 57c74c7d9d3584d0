//! Aggregated statistics models

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Aggregation window for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    /// Monday through Sunday of the current week
    Weekly,
    /// First through last day of the current month
    Monthly,
}

impl StatsPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Weekly => "weekly",
            StatsPeriod::Monthly => "monthly",
        }
    }

    /// Calendar days covered by this period for the given day.
    pub fn bounds(&self, today: NaiveDate) -> DateRange {
        match self {
            StatsPeriod::Weekly => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let start_date = today - Days::new(offset);
                DateRange {
                    start_date,
                    end_date: start_date + Days::new(6),
                }
            }
            StatsPeriod::Monthly => {
                let start_date = today.with_day(1).unwrap_or(today);
                let end_date = (start_date + Months::new(1)) - Days::new(1);
                DateRange {
                    start_date,
                    end_date,
                }
            }
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total intake for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPoint {
    pub date: NaiveDate,
    pub amount: u32,
}

/// Per-day totals for a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterStats {
    pub period: StatsPeriod,
    pub data: Vec<StatPoint>,
}

impl WaterStats {
    pub fn total(&self) -> u32 {
        self.data
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.amount))
    }

    /// Average over days that have data points
    pub fn daily_average(&self) -> f64 {
        if self.data.is_empty() {
            0.0
        } else {
            f64::from(self.total()) / self.data.len() as f64
        }
    }
}
