//! Statistics display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::StatPoint;
use crate::output::formatters::progress_bar;

/// Width of the per-day bar in stats tables
const STAT_BAR_WIDTH: usize = 10;

/// One day of a stats period for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StatDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "AMOUNT")]
    pub amount: u32,

    #[tabled(rename = "")]
    #[serde(skip)]
    pub bar: String,
}

impl StatDisplay {
    /// Row for `point`, with the bar scaled against `goal_amount`
    pub fn new(point: &StatPoint, goal_amount: u32) -> Self {
        Self {
            date: point.date.format("%a %m/%d").to_string(),
            amount: point.amount,
            bar: progress_bar(point.amount, goal_amount, STAT_BAR_WIDTH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_stat_display() {
        let point = StatPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            amount: 4,
        };

        let display = StatDisplay::new(&point, 8);
        assert_eq!(display.date, "Wed 06/04");
        assert_eq!(display.bar.chars().filter(|c| *c == '█').count(), 5);
    }
}
