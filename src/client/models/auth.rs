//! Authentication and user models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Bearer token returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// The access token (a JWT when issued by the Hydrate API)
    pub access_token: String,

    /// Token scheme, usually `bearer`
    pub token_type: String,
}

impl AuthToken {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Expiration time read from the JWT payload, if the token is a JWT with `exp`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        #[derive(Deserialize)]
        struct JwtPayload {
            exp: i64,
        }

        // JWT format: header.payload.signature
        let parts: Vec<&str> = self.access_token.split('.').collect();
        if parts.len() != 3 {
            return None;
        }

        let payload_bytes = base64_decode_url(parts[1]).ok()?;
        let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
        DateTime::from_timestamp(payload.exp, 0)
    }
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| e.to_string())
}

/// Credentials for the OAuth2 password flow
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    /// Email address, sent as the form `username`
    pub username: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,

    /// Reminder interval in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_frequency: Option<u32>,

    /// First hour (0-23) reminders may fire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_hours_start: Option<u32>,

    /// Hour (0-23) reminders stop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_hours_end: Option<u32>,
}

/// Registered user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Reminder interval in minutes
    #[serde(default)]
    pub reminder_frequency: Option<u32>,

    #[serde(default)]
    pub active_hours_start: Option<u32>,

    #[serde(default)]
    pub active_hours_end: Option<u32>,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Minimal profile used after login when no registered profile is stored.
    ///
    /// The API has no "current user" endpoint, so the login response alone
    /// cannot produce one.
    pub fn placeholder(email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: "local-user".to_string(),
            email: email.to_string(),
            is_active: true,
            reminder_frequency: Some(120),
            active_hours_start: Some(9),
            active_hours_end: Some(21),
            created_at: now,
            updated_at: now,
        }
    }
}
