use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::custom_command::{CustomCommand, UpsertCustomCommandParam},
};

pub struct CustomCommandRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomCommandRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all custom commands for a guild ordered by name.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Vec<CustomCommand>)`: Commands in name order, empty if none
    /// - `Err(AppError)`: Database error
    pub async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, AppError> {
        entity::prelude::CustomCommand::find()
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::custom_command::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(CustomCommand::from_entity)
            .collect()
    }

    /// Finds a command by its normalized name.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `name`: Lowercase command name without the prefix
    ///
    /// # Returns
    /// - `Ok(Some(CustomCommand))`: Command found
    /// - `Ok(None)`: No command with that name in the guild
    /// - `Err(AppError)`: Database error
    pub async fn find_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<CustomCommand>, AppError> {
        entity::prelude::CustomCommand::find()
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::custom_command::Column::Name.eq(name))
            .one(self.db)
            .await?
            .map(CustomCommand::from_entity)
            .transpose()
    }

    /// Creates the command or replaces the response of an existing one with the same name.
    ///
    /// # Arguments
    /// - `param`: Guild, normalized name and response
    ///
    /// # Returns
    /// - `Ok(CustomCommand)`: The created or updated command
    /// - `Err(AppError)`: Database error
    pub async fn upsert(&self, param: UpsertCustomCommandParam) -> Result<CustomCommand, AppError> {
        let existing = entity::prelude::CustomCommand::find()
            .filter(entity::custom_command::Column::GuildId.eq(param.guild_id.to_string()))
            .filter(entity::custom_command::Column::Name.eq(&param.name))
            .one(self.db)
            .await?;

        let entity = if let Some(existing) = existing {
            // Update existing record, the original author is kept
            let mut active: entity::custom_command::ActiveModel = existing.into();
            active.response = ActiveValue::Set(param.response);
            active.is_embed = ActiveValue::Set(param.is_embed);
            active.update(self.db).await?
        } else {
            entity::custom_command::ActiveModel {
                guild_id: ActiveValue::Set(param.guild_id.to_string()),
                name: ActiveValue::Set(param.name),
                response: ActiveValue::Set(param.response),
                is_embed: ActiveValue::Set(param.is_embed),
                created_by: ActiveValue::Set(param.created_by.map(|id| id.to_string())),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            }
            .insert(self.db)
            .await?
        };

        CustomCommand::from_entity(entity)
    }

    /// Deletes a command by name.
    ///
    /// # Returns
    /// - `Ok(true)`: Command existed and was deleted
    /// - `Ok(false)`: No command with that name
    /// - `Err(AppError)`: Database error
    pub async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, AppError> {
        let result = entity::prelude::CustomCommand::delete_many()
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::custom_command::Column::Name.eq(name))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
