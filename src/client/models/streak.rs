//! Streak models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Consecutive-day logging streak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_logged_date: NaiveDate,
    pub id: String,
    pub user_id: String,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}
