//! Leveling factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for member XP rows.
///
/// `last_message_at` defaults to one hour ago so the first tracked message is
/// outside the XP cooldown.
pub struct MemberLevelFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    xp: i64,
    level: i32,
    last_message_at: DateTime<Utc>,
}

impl<'a> MemberLevelFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            user_id: next_id().to_string(),
            xp: 0,
            level: 0,
            last_message_at: Utc::now() - Duration::hours(1),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn xp(mut self, xp: i64) -> Self {
        self.xp = xp;
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn last_message_at(mut self, last_message_at: DateTime<Utc>) -> Self {
        self.last_message_at = last_message_at;
        self
    }

    pub async fn build(self) -> Result<entity::member_level::Model, DbErr> {
        entity::member_level::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            xp: ActiveValue::Set(self.xp),
            level: ActiveValue::Set(self.level),
            last_message_at: ActiveValue::Set(self.last_message_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_level_role(
    db: &DatabaseConnection,
    guild_id: &str,
    level: i32,
    role_id: &str,
) -> Result<entity::level_role::Model, DbErr> {
    entity::level_role::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        level: ActiveValue::Set(level),
        role_id: ActiveValue::Set(role_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}
