//! Hydrate API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AuthApi, WaterApi};
use super::models::{
    AuthToken, DailyWaterLog, DateRange, Goal, GoalUpdate, LoginCredentials, StatsPeriod, Streak,
    User, UserCreate, WaterLog, WaterLogCreate, WaterStats,
};
use crate::error::{ApiError, ApiResult};

/// Default API host when none is configured
pub const DEFAULT_API_HOST: &str = "http://localhost:8000";

/// Path prefix of every API route
const API_PREFIX: &str = "/api/v1";

/// Client-side rate limit
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Hydrate API client
pub struct HydrateClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    token: Option<AuthToken>,
}

impl HydrateClient {
    /// Create a client for `api_host` (scheme and authority, no path).
    pub fn new(api_host: &str, token: Option<AuthToken>) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota =
            Quota::per_second(NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: format!("{}{}", api_host.trim_end_matches('/'), API_PREFIX),
            rate_limiter,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authenticated request
    fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let header = self
            .token
            .as_ref()
            .map(AuthToken::authorization_header)
            .ok_or(ApiError::Unauthorized)?;

        Ok(self
            .http
            .request(method, self.url(path))
            .header("Authorization", header))
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        self.rate_limiter.until_ready().await;

        let response = request.send().await.map_err(ApiError::from)?;
        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Map a non-success status to an [`ApiError`].
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(
            error_detail(response)
                .await
                .unwrap_or_else(|| "Resource not found".to_string()),
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ApiError::RateLimit(Duration::from_secs(retry_after)))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(ApiError::BadRequest(
            error_detail(response)
                .await
                .unwrap_or_else(|| "Bad request".to_string()),
        )),
        status if status.is_server_error() => Err(ApiError::ServerError(
            error_detail(response)
                .await
                .unwrap_or_else(|| format!("Server error: {}", status)),
        )),
        _ => Err(ApiError::InvalidResponse(format!(
            "Unexpected status code: {}",
            status
        ))),
    }
}

/// Error message from a `{"detail": ...}` body, falling back to the raw text.
async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(body),
        },
        _ => Some(body),
    }
}

#[async_trait]
impl AuthApi for HydrateClient {
    async fn register(&self, user: &UserCreate) -> ApiResult<User> {
        let request = self.http.post(self.url("/auth/register")).json(user);
        self.send(request).await
    }

    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken> {
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("grant_type", "password"),
        ];
        let request = self.http.post(self.url("/auth/login")).form(&form);
        self.send(request).await
    }
}

#[async_trait]
impl WaterApi for HydrateClient {
    async fn log_water(&self, log: &WaterLogCreate) -> ApiResult<WaterLog> {
        let request = self.authorized(Method::POST, "/water/log")?.json(log);
        self.send(request).await
    }

    async fn update_goal(&self, goal_amount: u32) -> ApiResult<Goal> {
        let request = self
            .authorized(Method::POST, "/water/goal")?
            .json(&GoalUpdate { goal_amount });
        self.send(request).await
    }

    async fn today_logs(&self) -> ApiResult<DailyWaterLog> {
        let request = self.authorized(Method::GET, "/water/today")?;
        self.send(request).await
    }

    async fn streak(&self) -> ApiResult<Streak> {
        let request = self.authorized(Method::GET, "/water/streak")?;
        self.send(request).await
    }

    async fn goal(&self) -> ApiResult<Goal> {
        let request = self.authorized(Method::GET, "/water/goal")?;
        self.send(request).await
    }

    async fn history(&self, range: &DateRange) -> ApiResult<Vec<DailyWaterLog>> {
        let query = [
            ("start_date", range.start_date.to_string()),
            ("end_date", range.end_date.to_string()),
        ];
        let request = self
            .authorized(Method::GET, "/water/history")?
            .query(&query);
        self.send(request).await
    }

    async fn stats(&self, period: StatsPeriod) -> ApiResult<WaterStats> {
        let request = self
            .authorized(Method::GET, "/water/stats")?
            .query(&[("period", period.as_str())]);
        self.send(request).await
    }
}
