//! Water log display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{DailyWaterLog, WaterLog};
use crate::output::formatters::{format_time_local, or_dash};

/// One intake event for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LogDisplay {
    /// Local time of the log
    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "AMOUNT")]
    pub amount: u32,

    #[tabled(rename = "NOTES")]
    pub notes: String,
}

impl From<&WaterLog> for LogDisplay {
    fn from(log: &WaterLog) -> Self {
        Self {
            time: format_time_local(&log.timestamp),
            amount: log.amount,
            notes: or_dash(log.notes.as_deref()),
        }
    }
}

/// One day of history for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DayDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "TOTAL")]
    pub total: u32,

    #[tabled(rename = "LOGS")]
    pub logs: usize,

    /// Check mark when the day met the goal
    #[tabled(rename = "GOAL")]
    pub goal_met: String,
}

impl DayDisplay {
    pub fn new(day: &DailyWaterLog, goal_amount: u32) -> Self {
        let met = goal_amount > 0 && day.total_amount >= goal_amount;
        Self {
            date: day.date.to_string(),
            total: day.total_amount,
            logs: day.logs.len(),
            goal_met: if met { "✓" } else { "" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn log(notes: Option<&str>) -> WaterLog {
        WaterLog {
            id: "l1".to_string(),
            user_id: "u1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 4, 12, 0, 0).unwrap(),
            amount: 2,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_log_display() {
        let display = LogDisplay::from(&log(Some("lunch")));
        assert_eq!(display.amount, 2);
        assert_eq!(display.notes, "lunch");
        assert_eq!(display.time.len(), 5);

        assert_eq!(LogDisplay::from(&log(None)).notes, "--");
    }

    #[test]
    fn test_day_display_goal_mark() {
        let day = DailyWaterLog {
            date: Utc.with_ymd_and_hms(2025, 6, 4, 0, 0, 0).unwrap().date_naive(),
            total_amount: 8,
            logs: vec![log(None)],
        };

        let display = DayDisplay::new(&day, 8);
        assert_eq!(display.date, "2025-06-04");
        assert_eq!(display.logs, 1);
        assert_eq!(display.goal_met, "✓");

        assert_eq!(DayDisplay::new(&day, 10).goal_met, "");
    }
}
