//! Mock Hydrate API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AuthApi, WaterApi};
use super::models::{
    AuthToken, DEFAULT_GOAL_AMOUNT, DailyWaterLog, DateRange, Goal, LoginCredentials, StatPoint,
    StatsPeriod, Streak, User, UserCreate, WaterLog, WaterLogCreate, WaterStats, total_amount,
};
use crate::error::{ApiError, ApiResult};

/// Mock API client for testing.
///
/// Holds an in-memory list of logs and derives today's logs, history and
/// stats from it, so a write followed by a read observes the write. The
/// streak is advanced on every log the way the server does it. Configure
/// failures and latency via builder methods.
///
/// # Example
/// ```ignore
/// let mock = MockHydrateClient::new()
///     .with_latency(Duration::from_millis(50))
///     .await;
///
/// let today = mock.today_logs().await?;
/// assert_eq!(mock.call_counts().await.today_logs, 1);
/// ```
pub struct MockHydrateClient {
    /// Logs returned by today_logs
    logs: Arc<Mutex<Vec<WaterLog>>>,
    /// Goal amount returned by goal
    goal_amount: Arc<Mutex<u32>>,
    /// Streak kept up to date by log_water
    streak: Arc<Mutex<Option<Streak>>>,
    /// Token returned by login
    token: Arc<Mutex<Option<AuthToken>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by every call while set
    failing: Arc<Mutex<Option<ApiError>>>,
    /// Delay applied to every call after it is counted
    latency: Arc<Mutex<Duration>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Fixed "now" for generated records
    now: DateTime<Utc>,
}

impl Default for MockHydrateClient {
    fn default() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            goal_amount: Arc::new(Mutex::new(DEFAULT_GOAL_AMOUNT)),
            streak: Arc::new(Mutex::new(None)),
            token: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            failing: Arc::new(Mutex::new(None)),
            latency: Arc::new(Mutex::new(Duration::ZERO)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            now: Utc::now(),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub register: usize,
    pub login: usize,
    pub log_water: usize,
    pub update_goal: usize,
    pub today_logs: usize,
    pub streak: usize,
    pub goal: usize,
    pub history: usize,
    pub stats: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.register
            + self.login
            + self.log_water
            + self.update_goal
            + self.today_logs
            + self.streak
            + self.goal
            + self.history
            + self.stats
    }
}

impl MockHydrateClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the server's notion of "now".
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Configure the logs known to the server.
    pub async fn with_logs(self, logs: Vec<WaterLog>) -> Self {
        *self.logs.lock().await = logs;
        self
    }

    /// Configure the streak returned by streak.
    pub async fn with_streak(self, streak: Streak) -> Self {
        *self.streak.lock().await = Some(streak);
        self
    }

    /// Configure the token returned by login.
    pub async fn with_token(self, token: AuthToken) -> Self {
        *self.token.lock().await = Some(token);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure a delay applied to every call.
    pub async fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock().await = latency;
        self
    }

    /// Make every call fail with `error` until cleared with `None`.
    pub async fn set_failing(&self, error: Option<ApiError>) {
        *self.failing.lock().await = error;
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Count a call, wait out the latency, then report any configured error.
    async fn enter(&self, count: impl FnOnce(&mut CallCounts)) -> ApiResult<()> {
        count(&mut *self.call_count.lock().await);

        let latency = *self.latency.lock().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if let Some(e) = self.error.lock().await.take() {
            return Err(e);
        }
        if let Some(e) = self.failing.lock().await.clone() {
            return Err(e);
        }

        Ok(())
    }

    /// Count a log on `day`: same day keeps the streak, the next day extends
    /// it, a later day restarts it. Logs older than the last one are ignored.
    async fn advance_streak(&self, day: NaiveDate) {
        let (id, user_id) = self.record_ids();
        let mut slot = self.streak.lock().await;
        let streak = slot.get_or_insert_with(|| Streak {
            current_streak: 0,
            longest_streak: 0,
            last_logged_date: day,
            id,
            user_id,
            updated_at: self.now,
        });

        if streak.current_streak > 0 && day <= streak.last_logged_date {
            return;
        }
        if streak.current_streak > 0 && streak.last_logged_date.succ_opt() == Some(day) {
            streak.current_streak += 1;
        } else {
            streak.current_streak = 1;
        }
        streak.longest_streak = streak.longest_streak.max(streak.current_streak);
        streak.last_logged_date = day;
        streak.updated_at = self.now;
    }

    fn record_ids(&self) -> (String, String) {
        ("mock-id".to_string(), "mock-user".to_string())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockHydrateClient {
    async fn register(&self, user: &UserCreate) -> ApiResult<User> {
        self.enter(|c| c.register += 1).await?;

        let mut profile = User::placeholder(&user.email, self.now);
        profile.id = "mock-user".to_string();
        if user.reminder_frequency.is_some() {
            profile.reminder_frequency = user.reminder_frequency;
        }
        if user.active_hours_start.is_some() {
            profile.active_hours_start = user.active_hours_start;
        }
        if user.active_hours_end.is_some() {
            profile.active_hours_end = user.active_hours_end;
        }
        Ok(profile)
    }

    async fn login(&self, _credentials: &LoginCredentials) -> ApiResult<AuthToken> {
        self.enter(|c| c.login += 1).await?;

        let token = self.token.lock().await;
        Ok(token.clone().unwrap_or_else(|| AuthToken {
            access_token: "mock-token".to_string(),
            token_type: "bearer".to_string(),
        }))
    }
}

// ============================================================================
// WaterApi Implementation
// ============================================================================

#[async_trait]
impl WaterApi for MockHydrateClient {
    async fn log_water(&self, log: &WaterLogCreate) -> ApiResult<WaterLog> {
        self.enter(|c| c.log_water += 1).await?;

        let mut logs = self.logs.lock().await;
        let (_, user_id) = self.record_ids();
        let created = WaterLog {
            id: format!("mock-log-{}", logs.len() + 1),
            user_id,
            timestamp: log.timestamp,
            amount: log.amount,
            notes: log.notes.clone(),
        };
        logs.push(created.clone());
        self.advance_streak(created.day()).await;
        Ok(created)
    }

    async fn update_goal(&self, goal_amount: u32) -> ApiResult<Goal> {
        self.enter(|c| c.update_goal += 1).await?;

        *self.goal_amount.lock().await = goal_amount;
        let (id, user_id) = self.record_ids();
        Ok(Goal {
            goal_amount,
            id,
            user_id,
            updated_at: self.now,
        })
    }

    async fn today_logs(&self) -> ApiResult<DailyWaterLog> {
        self.enter(|c| c.today_logs += 1).await?;

        let today = self.now.date_naive();
        let logs: Vec<WaterLog> = self
            .logs
            .lock()
            .await
            .iter()
            .filter(|l| l.day() == today)
            .cloned()
            .collect();
        Ok(DailyWaterLog {
            date: today,
            total_amount: total_amount(&logs),
            logs,
        })
    }

    async fn streak(&self) -> ApiResult<Streak> {
        self.enter(|c| c.streak += 1).await?;

        if let Some(streak) = self.streak.lock().await.clone() {
            return Ok(streak);
        }
        let (id, user_id) = self.record_ids();
        Ok(Streak {
            current_streak: 0,
            longest_streak: 0,
            last_logged_date: self.now.date_naive(),
            id,
            user_id,
            updated_at: self.now,
        })
    }

    async fn goal(&self) -> ApiResult<Goal> {
        self.enter(|c| c.goal += 1).await?;

        let (id, user_id) = self.record_ids();
        Ok(Goal {
            goal_amount: *self.goal_amount.lock().await,
            id,
            user_id,
            updated_at: self.now,
        })
    }

    async fn history(&self, range: &DateRange) -> ApiResult<Vec<DailyWaterLog>> {
        self.enter(|c| c.history += 1).await?;

        let logs = self.logs.lock().await;
        Ok(range
            .days()
            .map(|date| {
                let day_logs: Vec<WaterLog> =
                    logs.iter().filter(|l| l.day() == date).cloned().collect();
                DailyWaterLog {
                    date,
                    total_amount: total_amount(&day_logs),
                    logs: day_logs,
                }
            })
            .collect())
    }

    async fn stats(&self, period: StatsPeriod) -> ApiResult<WaterStats> {
        self.enter(|c| c.stats += 1).await?;

        let logs = self.logs.lock().await;
        let data = period
            .bounds(self.now.date_naive())
            .days()
            .map(|date| {
                let day_logs: Vec<WaterLog> =
                    logs.iter().filter(|l| l.day() == date).cloned().collect();
                StatPoint {
                    date,
                    amount: total_amount(&day_logs),
                }
            })
            .collect();
        Ok(WaterStats { period, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockHydrateClient::new();
        let today = mock.today_logs().await.unwrap();
        assert_eq!(today.total_amount, 0);
        assert_eq!(mock.goal().await.unwrap().goal_amount, 8);
    }

    #[tokio::test]
    async fn test_mock_client_log_then_read() {
        let mock = MockHydrateClient::new();
        let create = WaterLogCreate::new(2, None, mock.now);
        mock.log_water(&create).await.unwrap();

        let today = mock.today_logs().await.unwrap();
        assert_eq!(today.total_amount, 2);
        assert_eq!(today.logs.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_streak_follows_logs() {
        let mock = MockHydrateClient::new();
        for days_ago in [5, 2, 1, 1, 0] {
            let at = mock.now - chrono::Duration::days(days_ago);
            mock.log_water(&WaterLogCreate::new(1, None, at))
                .await
                .unwrap();
        }

        let streak = mock.streak().await.unwrap();
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.last_logged_date, mock.now.date_naive());
    }

    #[tokio::test]
    async fn test_mock_client_stats_zero_filled() {
        let mock = MockHydrateClient::new();
        mock.log_water(&WaterLogCreate::new(2, None, mock.now))
            .await
            .unwrap();

        let stats = mock.stats(StatsPeriod::Monthly).await.unwrap();
        let month = StatsPeriod::Monthly.bounds(mock.now.date_naive());
        assert_eq!(stats.data.len(), month.len());
        assert_eq!(stats.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockHydrateClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        assert_eq!(mock.streak().await.unwrap_err(), ApiError::Unauthorized);
        // Consumed after one use
        assert!(mock.streak().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_failing_until_cleared() {
        let mock = MockHydrateClient::new();
        mock.set_failing(Some(ApiError::ServerError("down".to_string())))
            .await;
        assert!(mock.goal().await.is_err());
        assert!(mock.goal().await.is_err());

        mock.set_failing(None).await;
        assert!(mock.goal().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_call_counts() {
        let mock = MockHydrateClient::new();
        let _ = mock.today_logs().await;
        let _ = mock.update_goal(10).await;

        let counts = mock.call_counts().await;
        assert_eq!(counts.today_logs, 1);
        assert_eq!(counts.update_goal, 1);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_client_login_default_token() {
        let mock = MockHydrateClient::new();
        let token = mock
            .login(&LoginCredentials {
                username: "sam@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.access_token, "mock-token");
    }
}
