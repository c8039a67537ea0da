//! Guild config factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating guild config rows.
///
/// Defaults to a unique guild id and an empty settings document.
pub struct GuildConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    settings: serde_json::Value,
}

impl<'a> GuildConfigFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            settings: serde_json::json!({}),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }

    pub async fn build(self) -> Result<entity::guild_config::Model, DbErr> {
        entity::guild_config::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            settings: ActiveValue::Set(self.settings.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild config with the provided settings document.
pub async fn create_guild_config(
    db: &DatabaseConnection,
    guild_id: &str,
    settings: serde_json::Value,
) -> Result<entity::guild_config::Model, DbErr> {
    GuildConfigFactory::new(db)
        .guild_id(guild_id)
        .settings(settings)
        .build()
        .await
}
