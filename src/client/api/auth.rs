//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AuthToken, LoginCredentials, User, UserCreate};
use crate::error::ApiResult;

/// Account operations for the Hydrate API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account. Does not sign in.
    async fn register(&self, user: &UserCreate) -> ApiResult<User>;

    /// Exchange email and password for a bearer token
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthToken>;
}
