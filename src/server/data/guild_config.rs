//! Guild settings repository.
//!
//! Each guild has at most one `guild_config` row whose `settings` column holds a JSON
//! object. Writes merge top level keys into the stored object so the bot and the
//! dashboard can each update their own keys without clobbering the other's.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use serde_json::{Map, Value};

use crate::server::{error::AppError, model::guild_config::GuildSettings};

pub struct GuildConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::guild_config::Model>, AppError> {
        let entity = entity::prelude::GuildConfig::find()
            .filter(entity::guild_config::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        Ok(entity)
    }

    /// Gets the stored settings for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))`: Settings row exists
    /// - `Ok(None)`: Guild has never been configured
    /// - `Err(AppError)`: Database error or unparsable stored document
    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildSettings>, AppError> {
        self.find_entity(guild_id)
            .await?
            .map(GuildSettings::from_entity)
            .transpose()
    }

    /// Gets the stored settings, or an empty document when none exist.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)`: Stored or empty settings
    /// - `Err(AppError)`: Database error or unparsable stored document
    pub async fn get_or_default(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        Ok(self
            .get(guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::empty(guild_id)))
    }

    /// Merges top level keys into the guild's settings, creating the row if needed.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `patch`: Keys to insert or replace
    ///
    /// # Returns
    /// - `Ok(GuildSettings)`: The settings after the merge
    /// - `Err(AppError)`: Database or serialization error
    pub async fn merge(
        &self,
        guild_id: u64,
        patch: Map<String, Value>,
    ) -> Result<GuildSettings, AppError> {
        let existing = self.find_entity(guild_id).await?;
        let now = Utc::now();

        let entity = match existing {
            Some(existing) => {
                let mut settings = GuildSettings::from_entity(existing.clone())?;
                settings.merge(patch);

                let mut active: entity::guild_config::ActiveModel = existing.into();
                active.settings = ActiveValue::Set(Value::Object(settings.values).to_string());
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                let mut settings = GuildSettings::empty(guild_id);
                settings.merge(patch);

                entity::guild_config::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    settings: ActiveValue::Set(Value::Object(settings.values).to_string()),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        GuildSettings::from_entity(entity)
    }

    /// Sets a single top level key.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `key`: Top level settings key
    /// - `value`: New value, replacing any previous one
    ///
    /// # Returns
    /// - `Ok(GuildSettings)`: The settings after the write
    /// - `Err(AppError)`: Database or serialization error
    pub async fn set_key(
        &self,
        guild_id: u64,
        key: &str,
        value: Value,
    ) -> Result<GuildSettings, AppError> {
        self.merge(guild_id, crate::server::model::guild_config::patch(key, value))
            .await
    }
}
