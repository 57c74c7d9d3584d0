//! Water tracking state
//!
//! [`WaterTracker`] owns the latest snapshot of everything the CLI shows and
//! the operations that refresh or change it. It talks to the API through the
//! cached client when signed in, and to the local mirror otherwise.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CachedWaterClient;
use crate::client::fallback::{self, or_fallback};
use crate::client::models::{
    DailyWaterLog, DateRange, Goal, StatsPeriod, Streak, WaterLog, WaterLogCreate, WaterStats,
};
use crate::client::{HydrateApi, WaterApi};
use crate::error::{Error, Result};
use crate::mirror::LocalMirror;

/// Source of the current time
pub type Clock = fn() -> DateTime<Utc>;

/// Where water data comes from, chosen once from the session
pub enum Backend<C: HydrateApi> {
    Remote(CachedWaterClient<C>),
    Local(LocalMirror),
}

/// Everything the tracker currently knows
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub today_logs: Option<DailyWaterLog>,
    pub streak: Option<Streak>,
    pub goal: Option<Goal>,
    pub history: Vec<DailyWaterLog>,
    pub stats: Option<WaterStats>,
    pub is_loading: bool,
    /// Message of the last failed operation
    pub error: Option<String>,
}

/// Today's total against the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub total_amount: u32,
    pub goal_amount: u32,
    pub achieved: bool,
}

impl GoalProgress {
    pub fn new(total_amount: u32, goal_amount: u32) -> Self {
        Self {
            total_amount,
            goal_amount,
            achieved: goal_amount > 0 && total_amount >= goal_amount,
        }
    }

    /// Share of the goal reached, capped at 100
    pub fn percent(&self) -> u32 {
        if self.goal_amount == 0 {
            return 0;
        }
        (self.total_amount.saturating_mul(100) / self.goal_amount).min(100)
    }
}

/// Presentation state over a remote or local backend
pub struct WaterTracker<C: HydrateApi> {
    backend: Backend<C>,
    state: Snapshot,
    clock: Clock,
}

impl<C: HydrateApi + 'static> WaterTracker<C> {
    pub fn new(backend: Backend<C>) -> Self {
        Self::with_clock(backend, Utc::now)
    }

    pub fn with_clock(backend: Backend<C>, clock: Clock) -> Self {
        Self {
            backend,
            state: Snapshot::default(),
            clock,
        }
    }

    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    #[cfg(test)]
    pub fn backend(&self) -> &Backend<C> {
        &self.backend
    }

    pub fn is_offline(&self) -> bool {
        matches!(self.backend, Backend::Local(_))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Progress for today, once today's logs and the goal are loaded
    pub fn progress(&self) -> Option<GoalProgress> {
        let today = self.state.today_logs.as_ref()?;
        let goal = self.state.goal.as_ref()?;
        Some(GoalProgress::new(today.total_amount, goal.goal_amount))
    }

    fn begin(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
    }

    /// Finish an operation, recording its error if it failed.
    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        self.state.is_loading = false;
        if let Err(e) = &result {
            log::debug!("Tracker operation failed: {}", e);
            self.state.error = Some(e.to_string());
        }
        result
    }

    /// Load today's logs, streak and goal.
    pub async fn load_initial(&mut self) -> Result<()> {
        self.refresh_today_logs(false).await?;
        self.refresh_streak(false).await?;
        self.refresh_goal(false).await?;
        Ok(())
    }

    /// Record an intake event, then refresh today's logs and the streak.
    pub async fn log_water_intake(
        &mut self,
        amount: u32,
        notes: Option<String>,
    ) -> Result<WaterLog> {
        self.begin();
        let now = self.now();

        let logged = match &self.backend {
            Backend::Remote(client) => client
                .log_water(&WaterLogCreate::new(amount, notes, now))
                .await
                .map_err(Error::from),
            Backend::Local(mirror) => mirror.log_water(amount, notes, now).map_err(Error::from),
        };
        let logged = self.finish(logged)?;

        self.refresh_today_logs(false).await?;
        self.refresh_streak(false).await?;
        Ok(logged)
    }

    pub async fn refresh_today_logs(&mut self, force: bool) -> Result<DailyWaterLog> {
        self.begin();
        let now = self.now();

        let today = match &self.backend {
            Backend::Remote(client) => {
                let result = if force {
                    client.today_logs_fresh().await
                } else {
                    client.today_logs().await
                };
                Ok(or_fallback(result, "today's logs", || {
                    fallback::today_logs(now.date_naive())
                }))
            }
            Backend::Local(mirror) => mirror.today_logs(now).map_err(Error::from),
        };

        let today = self.finish(today)?;
        self.state.today_logs = Some(today.clone());
        Ok(today)
    }

    pub async fn refresh_streak(&mut self, force: bool) -> Result<Streak> {
        self.begin();
        let now = self.now();

        let streak = match &self.backend {
            Backend::Remote(client) => {
                let result = if force {
                    client.streak_fresh().await
                } else {
                    client.streak().await
                };
                Ok(or_fallback(result, "streak", || fallback::streak(now)))
            }
            Backend::Local(mirror) => mirror.streak(now).map_err(Error::from),
        };

        let streak = self.finish(streak)?;
        self.state.streak = Some(streak.clone());
        Ok(streak)
    }

    pub async fn refresh_goal(&mut self, force: bool) -> Result<Goal> {
        self.begin();
        let now = self.now();

        let goal = match &self.backend {
            Backend::Remote(client) => {
                let result = if force {
                    client.goal_fresh().await
                } else {
                    client.goal().await
                };
                Ok(or_fallback(result, "goal", || fallback::goal(now)))
            }
            Backend::Local(mirror) => mirror.goal(now).map_err(Error::from),
        };

        let goal = self.finish(goal)?;
        self.state.goal = Some(goal.clone());
        Ok(goal)
    }

    /// Set the daily goal; it must be at least one unit.
    pub async fn set_goal(&mut self, goal_amount: u32) -> Result<Goal> {
        self.begin();
        if goal_amount < 1 {
            return self.finish(Err(Error::InvalidInput(
                "Goal must be at least 1".to_string(),
            )));
        }
        let now = self.now();

        let goal = match &self.backend {
            Backend::Remote(client) => client.update_goal(goal_amount).await.map_err(Error::from),
            Backend::Local(mirror) => mirror.set_goal(goal_amount, now).map_err(Error::from),
        };

        let goal = self.finish(goal)?;
        self.state.goal = Some(goal.clone());
        Ok(goal)
    }

    pub async fn fetch_history(&mut self, range: &DateRange) -> Result<Vec<DailyWaterLog>> {
        self.begin();

        let history = match &self.backend {
            Backend::Remote(client) => Ok(or_fallback(
                client.history(range).await,
                "history",
                || fallback::history(range),
            )),
            Backend::Local(mirror) => mirror.history(range).map_err(Error::from),
        };

        let history = self.finish(history)?;
        self.state.history = history.clone();
        Ok(history)
    }

    pub async fn fetch_stats(&mut self, period: StatsPeriod) -> Result<WaterStats> {
        self.begin();
        let now = self.now();

        let stats = match &self.backend {
            Backend::Remote(client) => Ok(or_fallback(
                client.stats(period).await,
                "stats",
                || fallback::stats(period),
            )),
            Backend::Local(mirror) => mirror.stats(period, now).map_err(Error::from),
        };

        let stats = self.finish(stats)?;
        self.state.stats = Some(stats.clone());
        Ok(stats)
    }
}
