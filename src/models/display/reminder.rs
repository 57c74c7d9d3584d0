//! Reminder history display model

use serde::Serialize;
use tabled::Tabled;

use crate::output::formatters::format_datetime_local;
use crate::reminder::ReminderEntry;

/// One delivered reminder for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ReminderDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "SENT")]
    pub sent: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&ReminderEntry> for ReminderDisplay {
    fn from(entry: &ReminderEntry) -> Self {
        Self {
            id: entry.id.chars().take(8).collect(),
            sent: format_datetime_local(&entry.timestamp),
            status: if entry.success { "delivered" } else { "failed" }.to_string(),
        }
    }
}
