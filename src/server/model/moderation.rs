//! Moderation warnings and action limits.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

pub const MAX_PURGE: i64 = 100;
pub const MAX_SLOWMODE_SECONDS: i64 = 21_600;
/// Discord caps timeouts at 28 days.
pub const MAX_TIMEOUT_MINUTES: i64 = 40_320;

#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Warning {
    pub fn from_entity(entity: entity::moderation_warning::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            moderator_id: parse_u64_from_string(entity.moderator_id)?,
            reason: entity.reason,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateWarningParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModAction {
    Kick,
    Ban,
    Timeout { minutes: i64 },
    Warn,
    Purge { count: usize },
    Slowmode { seconds: i64 },
}

impl ModAction {
    pub fn label(&self) -> String {
        match self {
            Self::Kick => "Kick".to_string(),
            Self::Ban => "Ban".to_string(),
            Self::Timeout { minutes } => format!("Timeout ({} min)", minutes),
            Self::Warn => "Warn".to_string(),
            Self::Purge { count } => format!("Purge ({} messages)", count),
            Self::Slowmode { seconds } => format!("Slowmode ({}s)", seconds),
        }
    }
}
