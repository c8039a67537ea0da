//! Giveaway and giveaway entry factories.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating giveaways.
///
/// Defaults:
/// - prize: `"Prize {id}"`
/// - winner_count: 1
/// - ends_at: one hour from now
/// - ended: `false`
/// - message_id: a unique snowflake
pub struct GiveawayFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    message_id: Option<String>,
    prize: String,
    winner_count: i32,
    ends_at: DateTime<Utc>,
    ended: bool,
}

impl<'a> GiveawayFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            channel_id: (id + 1).to_string(),
            message_id: Some((id + 2).to_string()),
            prize: format!("Prize {}", id),
            winner_count: 1,
            ends_at: Utc::now() + Duration::hours(1),
            ended: false,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn message_id(mut self, message_id: Option<String>) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn prize(mut self, prize: impl Into<String>) -> Self {
        self.prize = prize.into();
        self
    }

    pub fn winner_count(mut self, winner_count: i32) -> Self {
        self.winner_count = winner_count;
        self
    }

    pub fn ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.ends_at = ends_at;
        self
    }

    pub fn ended(mut self, ended: bool) -> Self {
        self.ended = ended;
        self
    }

    pub async fn build(self) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            message_id: ActiveValue::Set(self.message_id),
            prize: ActiveValue::Set(self.prize),
            description: ActiveValue::Set(None),
            winner_count: ActiveValue::Set(self.winner_count),
            host_id: ActiveValue::Set("1".to_string()),
            ends_at: ActiveValue::Set(self.ends_at),
            ended: ActiveValue::Set(self.ended),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_giveaway(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::giveaway::Model, DbErr> {
    GiveawayFactory::new(db).guild_id(guild_id).build().await
}

pub async fn create_entry(
    db: &DatabaseConnection,
    giveaway_id: i32,
    user_id: &str,
) -> Result<entity::giveaway_entry::Model, DbErr> {
    entity::giveaway_entry::ActiveModel {
        giveaway_id: ActiveValue::Set(giveaway_id),
        user_id: ActiveValue::Set(user_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
