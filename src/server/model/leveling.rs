//! Member XP and level role models plus the level curve.

use chrono::{DateTime, Utc};

use crate::{
    model::role::LevelRoleDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

pub const XP_PER_MESSAGE_MIN: i64 = 15;
pub const XP_PER_MESSAGE_MAX: i64 = 25;
pub const XP_COOLDOWN_SECONDS: i64 = 60;

/// XP needed to go from `level` to `level + 1`.
pub fn xp_to_next_level(level: i32) -> i64 {
    let n = i64::from(level.max(0));
    5 * n * n + 50 * n + 100
}

/// Splits total XP into `(level, xp into that level)`.
pub fn level_for_xp(total_xp: i64) -> (i32, i64) {
    let mut level = 0;
    let mut remaining = total_xp.max(0);

    while remaining >= xp_to_next_level(level) {
        remaining -= xp_to_next_level(level);
        level += 1;
    }

    (level, remaining)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberLevel {
    pub guild_id: u64,
    pub user_id: u64,
    pub xp: i64,
    pub level: i32,
    pub last_message_at: DateTime<Utc>,
}

impl MemberLevel {
    pub fn from_entity(entity: entity::member_level::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            xp: entity.xp,
            level: entity.level,
            last_message_at: entity.last_message_at,
        })
    }

    /// XP earned inside the current level and the size of the level.
    pub fn progress(&self) -> (i64, i64) {
        let (_, into_level) = level_for_xp(self.xp);
        (into_level, xp_to_next_level(self.level))
    }
}

/// Outcome of tracking one message.
#[derive(Debug, Clone, PartialEq)]
pub enum XpAward {
    /// Still inside the cooldown window.
    Cooldown,
    Gained { member: MemberLevel, leveled_up: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelRole {
    pub guild_id: u64,
    pub level: i32,
    pub role_id: u64,
}

impl LevelRole {
    pub fn from_entity(entity: entity::level_role::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            level: entity.level,
            role_id: parse_u64_from_string(entity.role_id)?,
        })
    }

    pub fn into_dto(self) -> LevelRoleDto {
        LevelRoleDto {
            level: self.level,
            role_id: self.role_id.to_string(),
        }
    }
}

/// Text progress bar for `/rank`.
pub fn progress_bar(current: i64, needed: i64, width: usize) -> String {
    let filled = if needed <= 0 {
        width
    } else {
        ((current.max(0) as f64 / needed as f64) * width as f64).floor() as usize
    }
    .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
