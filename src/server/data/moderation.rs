use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::moderation::{CreateWarningParam, Warning},
};

pub struct ModerationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModerationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a warning issued by a moderator.
    ///
    /// # Arguments
    /// - `param`: Guild, warned member, moderator and reason
    ///
    /// # Returns
    /// - `Ok(Warning)`: The stored warning
    /// - `Err(AppError)`: Database error
    pub async fn add_warning(&self, param: CreateWarningParam) -> Result<Warning, AppError> {
        let entity = entity::moderation_warning::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            moderator_id: ActiveValue::Set(param.moderator_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Warning::from_entity(entity)
    }

    /// Gets a member's warnings, newest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Warning>)`: Warnings for the member, empty if none
    /// - `Err(AppError)`: Database error
    pub async fn list(&self, guild_id: u64, user_id: u64) -> Result<Vec<Warning>, AppError> {
        entity::prelude::ModerationWarning::find()
            .filter(entity::moderation_warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::moderation_warning::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::moderation_warning::Column::CreatedAt)
            .order_by_desc(entity::moderation_warning::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Warning::from_entity)
            .collect()
    }
}
