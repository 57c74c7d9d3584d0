//! Reusable formatting utilities for CLI output
//!
//! Timestamps, progress bars and counts shared by several commands.

use chrono::{DateTime, Local, Utc};

/// Width of the progress bar in cells
pub const BAR_WIDTH: usize = 20;

/// Format a UTC timestamp as local wall-clock time.
///
/// # Example output
/// `14:30`
pub fn format_time_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Format a UTC timestamp as local date and time.
///
/// # Example output
/// `06/04/2025 14:30`
pub fn format_datetime_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%m/%d/%Y %H:%M").to_string()
}

/// Text progress bar for `total` out of `goal`, `width` cells wide.
///
/// # Example output
/// `██████░░░░░░░░░░░░░░`
pub fn progress_bar(total: u32, goal: u32, width: usize) -> String {
    let filled = if goal == 0 {
        0
    } else {
        ((total as usize * width) / goal as usize).min(width)
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "1 day", "3 days"
pub fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// "1 glass", "3 glasses"
pub fn glasses(count: u32) -> String {
    if count == 1 {
        "1 glass".to_string()
    } else {
        format!("{} glasses", count)
    }
}

/// "--" for missing values
pub fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_partial() {
        let bar = progress_bar(2, 8, 8);
        assert_eq!(bar, "██░░░░░░");
    }

    #[test]
    fn test_progress_bar_caps_at_width() {
        assert_eq!(progress_bar(12, 8, 4), "████");
    }

    #[test]
    fn test_progress_bar_zero_goal() {
        assert_eq!(progress_bar(3, 0, 4), "░░░░");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(0, "day"), "0 days");
        assert_eq!(plural(4, "reminder"), "4 reminders");
    }

    #[test]
    fn test_glasses() {
        assert_eq!(glasses(1), "1 glass");
        assert_eq!(glasses(3), "3 glasses");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "--");
        assert_eq!(or_dash(Some("")), "--");
        assert_eq!(or_dash(Some("lunch")), "lunch");
    }

    #[test]
    fn test_format_datetime_local_has_date() {
        let ts = DateTime::parse_from_rfc3339("2025-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        // Exact output depends on the local timezone
        assert!(format_datetime_local(&ts).contains("/2025"));
    }
}
