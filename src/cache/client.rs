//! Cached wrapper for the Hydrate API client
//!
//! Provides transparent caching of API reads using [`RequestCache`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cache::{CacheKey, RequestCache};
use crate::client::models::{
    AuthToken, DailyWaterLog, DateRange, Goal, LoginCredentials, StatsPeriod, Streak, User,
    UserCreate, WaterLog, WaterLogCreate, WaterStats,
};
use crate::client::{AuthApi, HydrateApi, WaterApi};
use crate::error::{ApiError, ApiResult};

type Cache<T> = RequestCache<CacheKey, T, ApiError>;

/// Cached wrapper for any HydrateApi implementation.
///
/// Reads are memoized per [`CacheKey`] with the key's policy, concurrent reads
/// of one key share a single request, and writes invalidate whatever they can
/// change. Cache can be disabled via the `enabled` flag (for `--no-cache`).
pub struct CachedWaterClient<C: HydrateApi> {
    inner: Arc<C>,
    enabled: bool,
    today: Cache<DailyWaterLog>,
    streak: Cache<Streak>,
    goal: Cache<Goal>,
    history: Cache<Vec<DailyWaterLog>>,
    stats: Cache<WaterStats>,
}

impl<C: HydrateApi + 'static> CachedWaterClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            enabled,
            today: Cache::new(),
            streak: Cache::new(),
            goal: Cache::new(),
            history: Cache::new(),
            stats: Cache::new(),
        }
    }

    /// Get the inner client
    #[cfg(test)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Route a read through `cache`, or straight to the API when disabled.
    async fn cached<T, F, Fut>(
        &self,
        cache: &Cache<T>,
        key: CacheKey,
        force_refresh: bool,
        fetch: F,
    ) -> ApiResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Arc<C>) -> Fut + Send,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        if !self.enabled {
            return fetch(inner).await;
        }
        cache
            .get(&key, key.policy(), force_refresh, move || fetch(inner))
            .await
    }

    /// Drop every read a new log on `day` can change.
    fn invalidate_for_log(&self, day: NaiveDate) {
        self.today.invalidate(&CacheKey::TodayLogs);
        self.streak.invalidate(&CacheKey::Streak);
        self.history.invalidate_where(|key| key.covers(day));
        self.stats.clear();
    }
}

#[async_trait]
impl<C: HydrateApi + 'static> AuthApi for CachedWaterClient<C> {
    /// Register - NEVER cached
    async fn register(&self, user: &UserCreate) -> ApiResult<User> {
        self.inner.register(user).await
    }

    /// Login - NEVER cached (security sensitive)
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken> {
        self.inner.login(credentials).await
    }
}

#[async_trait]
impl<C: HydrateApi + 'static> WaterApi for CachedWaterClient<C> {
    async fn log_water(&self, log: &WaterLogCreate) -> ApiResult<WaterLog> {
        let created = self.inner.log_water(log).await?;
        self.invalidate_for_log(created.day());
        Ok(created)
    }

    async fn update_goal(&self, goal_amount: u32) -> ApiResult<Goal> {
        let goal = self.inner.update_goal(goal_amount).await?;
        self.goal.invalidate(&CacheKey::Goal);
        if self.enabled {
            self.goal.prime(CacheKey::Goal, goal.clone());
        }
        Ok(goal)
    }

    async fn today_logs(&self) -> ApiResult<DailyWaterLog> {
        self.cached(&self.today, CacheKey::TodayLogs, false, |c| async move {
            c.today_logs().await
        })
        .await
    }

    async fn streak(&self) -> ApiResult<Streak> {
        self.cached(&self.streak, CacheKey::Streak, false, |c| async move {
            c.streak().await
        })
        .await
    }

    async fn goal(&self) -> ApiResult<Goal> {
        self.cached(&self.goal, CacheKey::Goal, false, |c| async move {
            c.goal().await
        })
        .await
    }

    async fn history(&self, range: &DateRange) -> ApiResult<Vec<DailyWaterLog>> {
        let range = *range;
        self.cached(&self.history, CacheKey::History(range), false, move |c| async move {
            c.history(&range).await
        })
        .await
    }

    async fn stats(&self, period: StatsPeriod) -> ApiResult<WaterStats> {
        self.cached(&self.stats, CacheKey::Stats(period), false, move |c| async move {
            c.stats(period).await
        })
        .await
    }

    async fn today_logs_fresh(&self) -> ApiResult<DailyWaterLog> {
        self.cached(&self.today, CacheKey::TodayLogs, true, |c| async move {
            c.today_logs().await
        })
        .await
    }

    async fn streak_fresh(&self) -> ApiResult<Streak> {
        self.cached(&self.streak, CacheKey::Streak, true, |c| async move {
            c.streak().await
        })
        .await
    }

    async fn goal_fresh(&self) -> ApiResult<Goal> {
        self.cached(&self.goal, CacheKey::Goal, true, |c| async move {
            c.goal().await
        })
        .await
    }
}
