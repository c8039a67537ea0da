//! Pending setup request repository.
//!
//! This is the shared table between the dashboard (producer) and the bot (consumer).
//! Rows are never locked: the consumer reads every unprocessed row, acts on it, and
//! flips `processed` afterwards whether or not the action succeeded.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{error::AppError, model::setup_request::PendingSetupRequest};

pub struct SetupRequestRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SetupRequestRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an unprocessed request.
    ///
    /// # Arguments
    /// - `guild_id`: Guild the bot should act on
    /// - `setup_type`: Type tag such as `create_role`
    /// - `data`: Payload in the type's wire format
    ///
    /// # Returns
    /// - `Ok(PendingSetupRequest)`: The stored row including its id
    /// - `Err(AppError)`: Database error
    pub async fn enqueue(
        &self,
        guild_id: u64,
        setup_type: &str,
        data: String,
    ) -> Result<PendingSetupRequest, AppError> {
        let entity = entity::pending_setup_request::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            setup_type: ActiveValue::Set(setup_type.to_string()),
            data: ActiveValue::Set(data),
            processed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        PendingSetupRequest::from_entity(entity)
    }

    /// Gets every unprocessed request, oldest first.
    ///
    /// Rows are returned as stored. Each one is converted by the caller so a row with a
    /// corrupt guild id can still be marked processed instead of failing the whole read.
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: Unprocessed rows ordered by id
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn get_unprocessed(
        &self,
    ) -> Result<Vec<entity::pending_setup_request::Model>, AppError> {
        Ok(entity::prelude::PendingSetupRequest::find()
            .filter(entity::pending_setup_request::Column::Processed.eq(false))
            .order_by_asc(entity::pending_setup_request::Column::Id)
            .all(self.db)
            .await?)
    }

    /// Marks a request processed.
    ///
    /// # Arguments
    /// - `id`: Row id of the request
    ///
    /// # Returns
    /// - `Ok(())`: Row flagged, or no row with that id exists
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn mark_processed(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::PendingSetupRequest::update_many()
            .col_expr(
                entity::pending_setup_request::Column::Processed,
                Expr::value(true),
            )
            .filter(entity::pending_setup_request::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Gets all requests for a guild, newest first.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Vec<PendingSetupRequest>)`: Processed and unprocessed requests
    /// - `Err(AppError)`: Database error or a stored guild id that is not numeric
    pub async fn list_for_guild(&self, guild_id: u64) -> Result<Vec<PendingSetupRequest>, AppError> {
        entity::prelude::PendingSetupRequest::find()
            .filter(entity::pending_setup_request::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::pending_setup_request::Column::CreatedAt)
            .order_by_desc(entity::pending_setup_request::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(PendingSetupRequest::from_entity)
            .collect()
    }

    /// Deletes a request scoped to its guild.
    ///
    /// # Returns
    /// - `Ok(true)`: Row deleted
    /// - `Ok(false)`: No row with that id belongs to the guild
    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::PendingSetupRequest::delete_many()
            .filter(entity::pending_setup_request::Column::Id.eq(id))
            .filter(entity::pending_setup_request::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
