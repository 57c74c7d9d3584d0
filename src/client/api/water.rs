//! Water tracking API trait
//!
//! Covers logging intake and the read-only aggregates the server derives from
//! the logs: today's total, streak, goal, history and statistics.

use async_trait::async_trait;

use crate::client::models::{
    DailyWaterLog, DateRange, Goal, Streak, StatsPeriod, WaterLog, WaterLogCreate, WaterStats,
};
use crate::error::ApiResult;

/// Water tracking operations for the Hydrate API
#[async_trait]
pub trait WaterApi: Send + Sync {
    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Record a water intake event.
    async fn log_water(&self, log: &WaterLogCreate) -> ApiResult<WaterLog>;

    /// Set the daily goal.
    async fn update_goal(&self, goal_amount: u32) -> ApiResult<Goal>;

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Logs for the current UTC day with their total.
    async fn today_logs(&self) -> ApiResult<DailyWaterLog>;

    async fn streak(&self) -> ApiResult<Streak>;

    async fn goal(&self) -> ApiResult<Goal>;

    /// One entry per day in the inclusive range.
    async fn history(&self, range: &DateRange) -> ApiResult<Vec<DailyWaterLog>>;

    async fn stats(&self, period: StatsPeriod) -> ApiResult<WaterStats>;

    // ========================================================================
    // Forced reads
    // ========================================================================
    //
    // The default implementations just delegate since only the cached wrapper
    // needs special handling.

    /// Today's logs, bypassing the cache.
    async fn today_logs_fresh(&self) -> ApiResult<DailyWaterLog> {
        self.today_logs().await
    }

    /// Streak, bypassing the cache.
    async fn streak_fresh(&self) -> ApiResult<Streak> {
        self.streak().await
    }

    /// Goal, bypassing the cache.
    async fn goal_fresh(&self) -> ApiResult<Goal> {
        self.goal().await
    }
}
