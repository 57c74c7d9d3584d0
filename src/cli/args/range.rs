//! Date range arguments for history

use chrono::NaiveDate;
use clap::Args;

use crate::client::models::DateRange;
use crate::error::{Error, Result};

/// Default number of days shown by `hydrate history`
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Longest range `hydrate history` will show
pub const MAX_HISTORY_DAYS: usize = 3660;

/// Date range selection: either the last N days or explicit bounds
#[derive(Debug, Clone, Args, Default)]
pub struct RangeArgs {
    /// Number of days ending today
    #[arg(long, short = 'd', conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,

    /// First day (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    /// Resolve to a concrete range relative to `today` (UTC).
    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange> {
        let range = match (self.start, self.end) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok_or_else(|| {
                Error::InvalidInput(format!("--start {} is after --end {}", start, end))
            })?,
            _ => {
                let days = self.days.unwrap_or(DEFAULT_HISTORY_DAYS);
                if days == 0 {
                    return Err(Error::InvalidInput("--days must be at least 1".to_string()));
                }
                DateRange::last_days(today, days).ok_or_else(|| {
                    Error::InvalidInput(format!("--days {} reaches too far back", days))
                })?
            }
        };

        if range.len() > MAX_HISTORY_DAYS {
            return Err(Error::InvalidInput(format!(
                "range covers {} days, at most {} are allowed",
                range.len(),
                MAX_HISTORY_DAYS
            )));
        }
        Ok(range)
    }
}
