//! Daily goal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Goal used when the user has never set one
pub const DEFAULT_GOAL_AMOUNT: u32 = 8;

/// Largest daily goal accepted
pub const MAX_GOAL_AMOUNT: u32 = 100;

/// Daily water intake goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Target units per day
    pub goal_amount: u32,
    pub id: String,
    pub user_id: String,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for setting the goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub goal_amount: u32,
}
