//! Cache keys for API reads

use std::fmt;

use chrono::NaiveDate;

use crate::cache::CachePolicy;
use crate::client::models::{DateRange, StatsPeriod};

/// Identifies one cached API read.
///
/// Displays as the stable key name used in logs, e.g. `history-2025-06-01-2025-06-07`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    TodayLogs,
    Streak,
    Goal,
    History(DateRange),
    Stats(StatsPeriod),
}

impl CacheKey {
    /// Freshness policy for this key
    pub fn policy(&self) -> CachePolicy {
        match self {
            CacheKey::TodayLogs => CachePolicy::TODAY,
            CacheKey::Streak => CachePolicy::STREAK,
            CacheKey::Goal => CachePolicy::GOAL,
            CacheKey::History(_) => CachePolicy::HISTORY,
            CacheKey::Stats(_) => CachePolicy::STATS,
        }
    }

    /// Whether a new log on `day` can change the value stored under this key.
    pub fn covers(&self, day: NaiveDate) -> bool {
        match self {
            CacheKey::TodayLogs | CacheKey::Streak | CacheKey::Stats(_) => true,
            CacheKey::History(range) => range.contains(day),
            CacheKey::Goal => false,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::TodayLogs => f.write_str("today-logs"),
            CacheKey::Streak => f.write_str("streak"),
            CacheKey::Goal => f.write_str("goal"),
            CacheKey::History(range) => {
                write!(f, "history-{}-{}", range.start_date, range.end_date)
            }
            CacheKey::Stats(period) => write!(f, "stats-{}", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_key_names() {
        assert_eq!(CacheKey::TodayLogs.to_string(), "today-logs");
        assert_eq!(CacheKey::Goal.to_string(), "goal");
        assert_eq!(
            CacheKey::History(range("2025-06-01", "2025-06-07")).to_string(),
            "history-2025-06-01-2025-06-07"
        );
        assert_eq!(
            CacheKey::Stats(StatsPeriod::Weekly).to_string(),
            "stats-weekly"
        );
    }

    #[test]
    fn test_history_keys_distinct_per_range() {
        let mut keys = HashSet::new();
        keys.insert(CacheKey::History(range("2025-06-01", "2025-06-07")));
        keys.insert(CacheKey::History(range("2025-06-01", "2025-06-07")));
        keys.insert(CacheKey::History(range("2025-06-02", "2025-06-07")));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_covers() {
        let day = "2025-06-04".parse().unwrap();
        assert!(CacheKey::TodayLogs.covers(day));
        assert!(CacheKey::Stats(StatsPeriod::Monthly).covers(day));
        assert!(!CacheKey::Goal.covers(day));
        assert!(CacheKey::History(range("2025-06-01", "2025-06-07")).covers(day));
        assert!(!CacheKey::History(range("2025-05-01", "2025-05-31")).covers(day));
    }

    #[test]
    fn test_policies() {
        assert_eq!(CacheKey::TodayLogs.policy().ttl.as_secs(), 30);
        assert_eq!(CacheKey::Goal.policy().ttl.as_secs(), 300);
        assert_eq!(CacheKey::Streak.policy().debounce.as_millis(), 2000);
    }
}
