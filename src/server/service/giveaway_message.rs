//! Discord side of giveaways: posting, live entry counts and result announcements.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, MessageId},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    bot::ui::giveaway::{ended_update, entries_update, giveaway_message, winners_announcement},
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::giveaway::Giveaway,
    service::giveaway::{FinishedGiveaway, GiveawayService, StartGiveaway},
};

pub struct GiveawayMessageService<'a> {
    db: &'a DatabaseConnection,
    /// Discord HTTP client for sending and editing messages
    http: Arc<Http>,
}

impl<'a> GiveawayMessageService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Stores a giveaway, posts it and records the posted message id.
    ///
    /// The stored row is removed again when the post fails.
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - Giveaway with its `message_id` set
    /// - `Err(AppError::BadRequest)` - Invalid prize, duration or winner count
    /// - `Err(AppError::DiscordErr)` - The message could not be posted
    pub async fn start(
        &self,
        params: StartGiveaway,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        let mut giveaway = GiveawayService::new(self.db).start(params, now).await?;

        let repo = GiveawayRepository::new(self.db);

        let message = match ChannelId::new(giveaway.channel_id)
            .send_message(&self.http, giveaway_message(&giveaway))
            .await
        {
            Ok(message) => message,
            Err(e) => {
                // No giveaway may run without a post.
                repo.delete(giveaway.id).await?;
                return Err(e.into());
            }
        };

        repo.set_message_id(giveaway.id, message.id.get()).await?;
        giveaway.message_id = Some(message.id.get());

        tracing::info!(
            "Started giveaway {} for '{}' in guild {}",
            giveaway.id,
            giveaway.prize,
            giveaway.guild_id
        );

        Ok(giveaway)
    }

    /// Refreshes the entry count shown on the giveaway post.
    pub async fn refresh_entries(&self, giveaway: &Giveaway, entries: u64) -> Result<(), AppError> {
        let Some(message_id) = giveaway.message_id else {
            return Ok(());
        };

        ChannelId::new(giveaway.channel_id)
            .edit_message(
                &self.http,
                MessageId::new(message_id),
                entries_update(giveaway, entries),
            )
            .await?;

        Ok(())
    }

    /// Edits the post into its ended form and announces the winners.
    pub async fn announce(&self, finished: &FinishedGiveaway) -> Result<(), AppError> {
        let giveaway = &finished.giveaway;
        let channel_id = ChannelId::new(giveaway.channel_id);

        if let Some(message_id) = giveaway.message_id {
            if let Err(e) = channel_id
                .edit_message(
                    &self.http,
                    MessageId::new(message_id),
                    ended_update(giveaway, &finished.winners, finished.entrant_count),
                )
                .await
            {
                tracing::warn!(
                    "Failed to edit giveaway {} message {}: {}",
                    giveaway.id,
                    message_id,
                    e
                );
            }
        }

        channel_id
            .send_message(&self.http, winners_announcement(giveaway, &finished.winners))
            .await?;

        Ok(())
    }

    /// Finishes every due giveaway and announces each result.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of giveaways finished by this call
    pub async fn finish_due(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let finished = GiveawayService::new(self.db).finish_due(now).await?;

        for result in &finished {
            if let Err(e) = self.announce(result).await {
                tracing::error!(
                    "Failed to announce giveaway {} in guild {}: {}",
                    result.giveaway.id,
                    result.giveaway.guild_id,
                    e
                );
            }
        }

        Ok(finished.len())
    }
}
