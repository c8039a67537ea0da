use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::giveaway::{CreateGiveawayParam, EntryToggle, Giveaway},
    util::parse::parse_u64_from_string,
};

pub struct GiveawayRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GiveawayRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a giveaway before its announcement message is posted.
    ///
    /// # Arguments
    /// - `param`: Guild, channel, prize, winner count and end time
    ///
    /// # Returns
    /// - `Ok(Giveaway)`: Stored giveaway without a message id
    /// - `Err(AppError)`: Database error
    pub async fn create(&self, param: CreateGiveawayParam) -> Result<Giveaway, AppError> {
        let entity = entity::giveaway::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            prize: ActiveValue::Set(param.prize),
            description: ActiveValue::Set(param.description),
            winner_count: ActiveValue::Set(param.winner_count.max(1) as i32),
            host_id: ActiveValue::Set(param.host_id.to_string()),
            ends_at: ActiveValue::Set(param.ends_at),
            ended: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Giveaway::from_entity(entity)
    }

    /// Links the giveaway to the message carrying its enter button.
    ///
    /// # Arguments
    /// - `id`: Row id of the giveaway
    /// - `message_id`: Discord message ID of the post
    ///
    /// # Returns
    /// - `Ok(())`: Message id stored, or no giveaway with that id
    /// - `Err(AppError)`: Database error
    pub async fn set_message_id(&self, id: i32, message_id: u64) -> Result<(), AppError> {
        entity::prelude::Giveaway::update_many()
            .col_expr(
                entity::giveaway::Column::MessageId,
                Expr::value(message_id.to_string()),
            )
            .filter(entity::giveaway::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Removes a giveaway together with its entries.
    ///
    /// Used when the announcement could not be posted, so no running giveaway is left
    /// without a message to enter through.
    ///
    /// # Returns
    /// - `Ok(true)`: Giveaway deleted
    /// - `Ok(false)`: No giveaway with that id
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        entity::prelude::GiveawayEntry::delete_many()
            .filter(entity::giveaway_entry::Column::GiveawayId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Giveaway::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets a giveaway by id.
    ///
    /// # Arguments
    /// - `id`: Row id of the giveaway
    ///
    /// # Returns
    /// - `Ok(Some(Giveaway))`: Giveaway found, ended or not
    /// - `Ok(None)`: No giveaway with that id
    /// - `Err(AppError)`: Database error or a stored id that is not numeric
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Giveaway>, AppError> {
        entity::prelude::Giveaway::find_by_id(id)
            .one(self.db)
            .await?
            .map(Giveaway::from_entity)
            .transpose()
    }

    /// Gets the giveaway announced by a message.
    ///
    /// # Arguments
    /// - `message_id`: Discord message carrying the enter button
    ///
    /// # Returns
    /// - `Ok(Some(Giveaway))`: Giveaway posted as that message
    /// - `Ok(None)`: The message is not a giveaway post
    /// - `Err(AppError)`: Database error or a stored id that is not numeric
    pub async fn find_by_message(&self, message_id: u64) -> Result<Option<Giveaway>, AppError> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::MessageId.eq(message_id.to_string()))
            .one(self.db)
            .await?
            .map(Giveaway::from_entity)
            .transpose()
    }

    /// Most recently created giveaway still running in a channel.
    ///
    /// # Returns
    /// - `Ok(Some(Giveaway))`: Newest running giveaway
    /// - `Ok(None)`: Nothing running in the channel
    /// - `Err(AppError)`: Database error
    pub async fn latest_active_in_channel(
        &self,
        channel_id: u64,
    ) -> Result<Option<Giveaway>, AppError> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::giveaway::Column::Ended.eq(false))
            .order_by_desc(entity::giveaway::Column::CreatedAt)
            .order_by_desc(entity::giveaway::Column::Id)
            .one(self.db)
            .await?
            .map(Giveaway::from_entity)
            .transpose()
    }

    /// Gets running giveaways whose end time has passed.
    ///
    /// # Arguments
    /// - `now`: Time the end dates are compared against
    ///
    /// # Returns
    /// - `Ok(Vec<Giveaway>)`: Due giveaways, earliest end first
    /// - `Err(AppError)`: Database error
    pub async fn due(&self, now: DateTime<Utc>) -> Result<Vec<Giveaway>, AppError> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::Ended.eq(false))
            .filter(entity::giveaway::Column::EndsAt.lte(now))
            .order_by_asc(entity::giveaway::Column::EndsAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Giveaway::from_entity)
            .collect()
    }

    /// Enters the user, or removes them if they already entered.
    ///
    /// # Returns
    /// - `Ok(EntryToggle::Entered)`: Entry created
    /// - `Ok(EntryToggle::Left)`: Existing entry removed
    /// - `Err(AppError)`: Database error
    pub async fn toggle_entry(
        &self,
        giveaway_id: i32,
        user_id: u64,
    ) -> Result<EntryToggle, AppError> {
        let existing = entity::prelude::GiveawayEntry::find()
            .filter(entity::giveaway_entry::Column::GiveawayId.eq(giveaway_id))
            .filter(entity::giveaway_entry::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            entity::prelude::GiveawayEntry::delete_by_id(existing.id)
                .exec(self.db)
                .await?;
            return Ok(EntryToggle::Left);
        }

        entity::giveaway_entry::ActiveModel {
            giveaway_id: ActiveValue::Set(giveaway_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(EntryToggle::Entered)
    }

    /// Gets the users who entered a giveaway in entry order.
    ///
    /// # Returns
    /// - `Ok(Vec<u64>)`: Discord user IDs
    /// - `Err(AppError)`: Database error or a stored user id that is not numeric
    pub async fn entrants(&self, giveaway_id: i32) -> Result<Vec<u64>, AppError> {
        entity::prelude::GiveawayEntry::find()
            .filter(entity::giveaway_entry::Column::GiveawayId.eq(giveaway_id))
            .order_by_asc(entity::giveaway_entry::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|entry| parse_u64_from_string(entry.user_id))
            .collect()
    }

    /// Counts the entries of a giveaway.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of entries
    /// - `Err(AppError)`: Database error
    pub async fn entry_count(&self, giveaway_id: i32) -> Result<u64, AppError> {
        Ok(entity::prelude::GiveawayEntry::find()
            .filter(entity::giveaway_entry::Column::GiveawayId.eq(giveaway_id))
            .count(self.db)
            .await?)
    }

    /// Flags a giveaway as ended.
    ///
    /// The update only matches running giveaways so two concurrent finishers cannot both
    /// draw winners.
    ///
    /// # Returns
    /// - `Ok(true)`: This call ended the giveaway
    /// - `Ok(false)`: It was already ended or does not exist
    pub async fn mark_ended(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Giveaway::update_many()
            .col_expr(entity::giveaway::Column::Ended, Expr::value(true))
            .filter(entity::giveaway::Column::Id.eq(id))
            .filter(entity::giveaway::Column::Ended.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
