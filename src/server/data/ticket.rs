use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter,
};

use crate::server::{
    error::AppError,
    model::ticket::{CreateTicketParam, Ticket},
};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a ticket for a freshly created ticket channel.
    ///
    /// # Arguments
    /// - `param`: Guild, channel, opening member and topic
    ///
    /// # Returns
    /// - `Ok(Ticket)`: The stored open ticket
    /// - `Err(AppError)`: Database error
    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        let entity = entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            topic: ActiveValue::Set(param.topic.value().to_string()),
            closed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            closed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Finds the ticket that owns a channel.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))`: Ticket found, open or closed
    /// - `Ok(None)`: The channel is not a ticket
    /// - `Err(AppError)`: Database error
    pub async fn find_by_channel(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Finds the member's open ticket, used to stop duplicate tickets.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))`: Member already has an open ticket
    /// - `Ok(None)`: No open ticket
    /// - `Err(AppError)`: Database error
    pub async fn find_open_for_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<Ticket>, AppError> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ticket::Column::Closed.eq(false))
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Marks the ticket in a channel closed.
    ///
    /// # Returns
    /// - `Ok(true)`: An open ticket was closed
    /// - `Ok(false)`: No open ticket in that channel
    pub async fn close(&self, channel_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::Closed, Expr::value(true))
            .col_expr(entity::ticket::Column::ClosedAt, Expr::value(Utc::now()))
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::Closed.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
