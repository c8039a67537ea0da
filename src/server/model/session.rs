//! Persisted OAuth tokens for dashboard logins.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Lifetime used when Discord omits `expires_in`, one week.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 604_800;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub session_id: String,
    pub user_id: u64,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl DashboardSession {
    pub fn from_entity(entity: entity::dashboard_session::Model) -> Result<Self, AppError> {
        Ok(Self {
            session_id: entity.session_id,
            user_id: parse_u64_from_string(entity.user_id)?,
            access_token: entity.access_token,
            refresh_token: entity.refresh_token,
            expires_at: entity.expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct CreateDashboardSessionParam {
    pub session_id: String,
    pub user_id: u64,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Tokens returned by a successful exchange or refresh.
#[derive(Debug, Clone)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}
