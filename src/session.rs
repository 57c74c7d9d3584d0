//! Sign-in state
//!
//! Register, login and logout update the token and profile held in
//! [`Config`]. Callers persist the config afterwards.

use chrono::{DateTime, Utc};

use crate::client::AuthApi;
use crate::client::models::{LoginCredentials, User, UserCreate};
use crate::config::Config;
use crate::error::Result;

/// Create an account and remember its profile. Does not sign in.
pub async fn register<A: AuthApi + ?Sized>(
    api: &A,
    config: &mut Config,
    user: &UserCreate,
) -> Result<User> {
    let profile = api.register(user).await?;
    log::info!("Registered {}", profile.email);
    config.user = Some(profile.clone());
    Ok(profile)
}

/// Sign in and store the token.
///
/// The API returns only a token, so the stored profile is reused when it
/// belongs to the same email and a placeholder profile is created otherwise.
pub async fn login<A: AuthApi + ?Sized>(
    api: &A,
    config: &mut Config,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<User> {
    let credentials = LoginCredentials {
        username: email.to_string(),
        password: password.to_string(),
    };
    let token = api.login(&credentials).await?;

    let profile = match config.user.take() {
        Some(existing) if existing.email.eq_ignore_ascii_case(email) => existing,
        _ => User::placeholder(email, now),
    };

    log::debug!("Signed in as {}", profile.email);
    config.token = Some(token);
    config.user = Some(profile.clone());
    Ok(profile)
}

/// Forget the token and profile. Returns whether anyone was signed in.
pub fn logout(config: &mut Config) -> bool {
    let had_session = config.token.is_some();
    config.token = None;
    config.user = None;
    had_session
}
