//! Aggregations over locally stored logs
//!
//! Pure functions producing the same shapes and totals the server returns for
//! the same logs.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::client::models::{
    DailyWaterLog, DateRange, StatPoint, StatsPeriod, Streak, WaterLog, WaterStats, total_amount,
};

/// Id used for locally computed records
pub const LOCAL_ID: &str = "local";

/// Summary of one day's logs, which must all fall on `date`.
pub fn daily_log(date: NaiveDate, logs: Vec<WaterLog>) -> DailyWaterLog {
    DailyWaterLog {
        date,
        total_amount: total_amount(&logs),
        logs,
    }
}

/// One entry per day of `range`, including days without logs.
pub fn history(range: &DateRange, logs: Vec<WaterLog>) -> Vec<DailyWaterLog> {
    let mut by_day = group_by_day(logs);
    range
        .days()
        .map(|date| daily_log(date, by_day.remove(&date).unwrap_or_default()))
        .collect()
}

/// Per-day totals over `range`, including days without logs.
pub fn stats(period: StatsPeriod, range: &DateRange, logs: &[WaterLog]) -> WaterStats {
    let mut totals: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for log in logs {
        let total = totals.entry(log.day()).or_default();
        *total = total.saturating_add(log.amount);
    }

    WaterStats {
        period,
        data: range
            .days()
            .map(|date| StatPoint {
                date,
                amount: totals.get(&date).copied().unwrap_or(0),
            })
            .collect(),
    }
}

/// Streak over the distinct days that have logs, given in ascending order.
///
/// The current streak only counts if its last day is today or yesterday.
pub fn streak(logged_days: &[NaiveDate], now: DateTime<Utc>) -> Streak {
    let today = now.date_naive();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in logged_days {
        let consecutive = previous
            .and_then(|p| p.checked_add_days(Days::new(1)))
            .is_some_and(|next| next == day);
        run = if consecutive { run + 1 } else { 1 };
        longest = longest.max(run);
        previous = Some(day);
    }

    let current = match previous {
        Some(last) if last == today || last.checked_add_days(Days::new(1)) == Some(today) => run,
        _ => 0,
    };

    Streak {
        current_streak: current,
        longest_streak: longest,
        last_logged_date: previous.unwrap_or(today),
        id: LOCAL_ID.to_string(),
        user_id: LOCAL_ID.to_string(),
        updated_at: now,
    }
}

fn group_by_day(logs: Vec<WaterLog>) -> BTreeMap<NaiveDate, Vec<WaterLog>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<WaterLog>> = BTreeMap::new();
    for log in logs {
        by_day.entry(log.day()).or_default().push(log);
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn log_at(day: &str, hour: u32, amount: u32) -> WaterLog {
        let timestamp = date(day).and_hms_opt(hour, 0, 0).unwrap().and_utc();
        WaterLog {
            id: format!("{day}-{hour}"),
            user_id: LOCAL_ID.to_string(),
            timestamp,
            amount,
            notes: None,
        }
    }

    fn noon(day: &str) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date(day).and_hms_opt(12, 0, 0).unwrap())
    }

    #[test]
    fn test_daily_log_totals() {
        let daily = daily_log(
            date("2025-06-02"),
            vec![log_at("2025-06-02", 8, 1), log_at("2025-06-02", 12, 3)],
        );
        assert_eq!(daily.total_amount, 4);
        assert_eq!(daily.logs.len(), 2);
    }

    #[test]
    fn test_history_zero_fills_range() {
        let range = DateRange::new(date("2025-06-01"), date("2025-06-04")).unwrap();
        let days = history(
            &range,
            vec![log_at("2025-06-02", 9, 2), log_at("2025-06-04", 9, 1)],
        );

        let totals: Vec<(String, u32)> = days
            .iter()
            .map(|d| (d.date.to_string(), d.total_amount))
            .collect();
        assert_eq!(
            totals,
            vec![
                ("2025-06-01".to_string(), 0),
                ("2025-06-02".to_string(), 2),
                ("2025-06-03".to_string(), 0),
                ("2025-06-04".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_weekly_stats_seven_points() {
        let range = StatsPeriod::Weekly.bounds(date("2025-06-04"));
        let result = stats(
            StatsPeriod::Weekly,
            &range,
            &[
                log_at("2025-06-02", 9, 2),
                log_at("2025-06-02", 15, 1),
                log_at("2025-06-08", 9, 4),
            ],
        );

        assert_eq!(result.data.len(), 7);
        assert_eq!(result.data[0].date, date("2025-06-02"));
        assert_eq!(result.data[0].amount, 3);
        assert_eq!(result.data[6].amount, 4);
        assert_eq!(result.total(), 7);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let logs = vec![log_at("2025-06-02", 8, u32::MAX), log_at("2025-06-02", 9, 1)];
        assert_eq!(daily_log(date("2025-06-02"), logs.clone()).total_amount, u32::MAX);

        let range = StatsPeriod::Weekly.bounds(date("2025-06-04"));
        let result = stats(StatsPeriod::Weekly, &range, &logs);
        assert_eq!(result.data[0].amount, u32::MAX);
        assert_eq!(result.total(), u32::MAX);
    }

    #[test]
    fn test_monthly_stats_whole_month() {
        let range = StatsPeriod::Monthly.bounds(date("2025-02-10"));
        let result = stats(StatsPeriod::Monthly, &range, &[]);
        assert_eq!(result.data.len(), 28);
        assert!(result.data.iter().all(|p| p.amount == 0));
    }

    #[test]
    fn test_streak_no_logs() {
        let streak = streak(&[], noon("2025-06-04"));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert_eq!(streak.last_logged_date, date("2025-06-04"));
    }

    #[test]
    fn test_streak_ending_today() {
        let days = [
            date("2025-05-28"),
            date("2025-06-02"),
            date("2025-06-03"),
            date("2025-06-04"),
        ];
        let streak = streak(&days, noon("2025-06-04"));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_streak_ending_yesterday_still_current() {
        let days = [date("2025-06-02"), date("2025-06-03")];
        let streak = streak(&days, noon("2025-06-04"));
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.last_logged_date, date("2025-06-03"));
    }

    #[test]
    fn test_streak_broken() {
        let days = [
            date("2025-05-01"),
            date("2025-05-02"),
            date("2025-05-03"),
            date("2025-05-04"),
            date("2025-06-01"),
        ];
        let streak = streak(&days, noon("2025-06-04"));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 4);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let days = [date("2025-05-31"), date("2025-06-01")];
        let streak = streak(&days, noon("2025-06-01"));
        assert_eq!(streak.current_streak, 2);
    }
}
