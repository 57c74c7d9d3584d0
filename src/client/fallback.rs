//! Deterministic substitutes for failed reads
//!
//! When a read fails, the tracker shows one of these instead of an error so
//! the screen stays usable. They are never stored in the request cache, so the
//! next read goes back to the server.

use chrono::{DateTime, NaiveDate, Utc};

use super::models::{
    DEFAULT_GOAL_AMOUNT, DailyWaterLog, DateRange, Goal, StatsPeriod, Streak, WaterStats,
};
use crate::error::ApiResult;

/// Id used for synthesized records
pub const FALLBACK_ID: &str = "fallback";

/// Nothing logged today
pub fn today_logs(today: NaiveDate) -> DailyWaterLog {
    DailyWaterLog::empty(today)
}

/// Zero streak that last logged today
pub fn streak(now: DateTime<Utc>) -> Streak {
    Streak {
        current_streak: 0,
        longest_streak: 0,
        last_logged_date: now.date_naive(),
        id: FALLBACK_ID.to_string(),
        user_id: FALLBACK_ID.to_string(),
        updated_at: now,
    }
}

/// The default goal
pub fn goal(now: DateTime<Utc>) -> Goal {
    Goal {
        goal_amount: DEFAULT_GOAL_AMOUNT,
        id: FALLBACK_ID.to_string(),
        user_id: FALLBACK_ID.to_string(),
        updated_at: now,
    }
}

/// One empty day per date in the range
pub fn history(range: &DateRange) -> Vec<DailyWaterLog> {
    range.days().map(DailyWaterLog::empty).collect()
}

/// A period with no data points
pub fn stats(period: StatsPeriod) -> WaterStats {
    WaterStats {
        period,
        data: Vec::new(),
    }
}

/// Unwrap a read result, substituting `fallback` on error.
pub fn or_fallback<T>(result: ApiResult<T>, what: &str, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to fetch {}, using fallback: {}", what, e);
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_today_fallback_is_empty() {
        let today = today_logs(now().date_naive());
        assert_eq!(today.total_amount, 0);
        assert!(today.logs.is_empty());
        assert_eq!(today.date, now().date_naive());
    }

    #[test]
    fn test_streak_fallback() {
        let streak = streak(now());
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert_eq!(streak.last_logged_date, now().date_naive());
        assert_eq!(streak.id, "fallback");
    }

    #[test]
    fn test_goal_fallback_is_default() {
        assert_eq!(goal(now()).goal_amount, 8);
    }

    #[test]
    fn test_history_fallback_covers_range() {
        let range = DateRange::last_days(now().date_naive(), 3).unwrap();
        let days = history(&range);
        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.total_amount == 0 && d.logs.is_empty()));
        assert_eq!(days[0].date, range.start_date);
        assert_eq!(days[2].date, range.end_date);
    }

    #[test]
    fn test_fallbacks_are_deterministic() {
        assert_eq!(streak(now()), streak(now()));
        assert_eq!(stats(StatsPeriod::Monthly), stats(StatsPeriod::Monthly));
    }

    #[test]
    fn test_or_fallback() {
        let ok: ApiResult<u32> = Ok(3);
        assert_eq!(or_fallback(ok, "goal", || 8), 3);

        let failed: ApiResult<u32> = Err(ApiError::Network("down".to_string()));
        assert_eq!(or_fallback(failed, "goal", || 8), 8);
    }
}
