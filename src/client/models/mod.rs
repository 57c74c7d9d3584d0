//! Hydrate API data models
//!
//! Domain types exchanged with the Hydrate API. The local mirror produces the
//! same types, so callers never branch on where a value came from.

mod auth;
mod goal;
mod stats;
mod streak;
pub mod timestamp;
mod water;

pub use auth::{AuthToken, LoginCredentials, User, UserCreate};
pub use goal::{DEFAULT_GOAL_AMOUNT, Goal, GoalUpdate, MAX_GOAL_AMOUNT};
pub use stats::{StatPoint, StatsPeriod, WaterStats};
pub use streak::Streak;
pub use water::{
    DEFAULT_LOG_AMOUNT, DailyWaterLog, DateRange, MAX_LOG_AMOUNT, WaterLog, WaterLogCreate,
    normalize_amount, total_amount,
};
