//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod reminder;
mod stats;
mod water;

pub use reminder::ReminderDisplay;
pub use stats::StatDisplay;
pub use water::{DayDisplay, LogDisplay};
