use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::{
        giveaway::{draw_winners, CreateGiveawayParam, EntryToggle, Giveaway},
        setup_request::{MAX_GIVEAWAY_MINUTES, MAX_GIVEAWAY_WINNERS},
    },
};

/// A giveaway that was just ended and the members drawn for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedGiveaway {
    pub giveaway: Giveaway,
    pub winners: Vec<u64>,
    pub entrant_count: usize,
}

/// What the bot needs to post a new giveaway.
#[derive(Debug, Clone)]
pub struct StartGiveaway {
    pub guild_id: u64,
    pub channel_id: u64,
    pub host_id: u64,
    pub prize: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub winner_count: u32,
}

pub struct GiveawayService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GiveawayService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new giveaway ending `duration_minutes` after `now`.
    ///
    /// The message id is attached with [`GiveawayRepository::set_message_id`] once the
    /// bot has posted the giveaway message.
    ///
    /// # Returns
    /// - `Ok(Giveaway)` - Stored giveaway
    /// - `Err(AppError::BadRequest)` - Blank prize, duration or winner count out of range
    pub async fn start(
        &self,
        params: StartGiveaway,
        now: DateTime<Utc>,
    ) -> Result<Giveaway, AppError> {
        if params.prize.trim().is_empty() {
            return Err(AppError::BadRequest("Prize is required".to_string()));
        }
        if params.duration_minutes == 0 || params.duration_minutes > MAX_GIVEAWAY_MINUTES {
            return Err(AppError::BadRequest(format!(
                "Duration must be between 1 and {} minutes",
                MAX_GIVEAWAY_MINUTES
            )));
        }

        GiveawayRepository::new(self.db)
            .create(CreateGiveawayParam {
                guild_id: params.guild_id,
                channel_id: params.channel_id,
                prize: params.prize.trim().to_string(),
                description: params.description,
                winner_count: params.winner_count.clamp(1, MAX_GIVEAWAY_WINNERS),
                host_id: params.host_id,
                ends_at: now + Duration::minutes(i64::from(params.duration_minutes)),
            })
            .await
    }

    /// Toggles a member's entry for the giveaway posted as `message_id`.
    ///
    /// # Returns
    /// - `Ok(Some((toggle, entries)))` - Entry toggled, with the new entry count
    /// - `Ok(None)` - Unknown message or the giveaway already ended
    pub async fn toggle_entry(
        &self,
        message_id: u64,
        user_id: u64,
    ) -> Result<Option<(EntryToggle, u64)>, AppError> {
        let repo = GiveawayRepository::new(self.db);

        let Some(giveaway) = repo.find_by_message(message_id).await? else {
            return Ok(None);
        };
        if giveaway.ended {
            return Ok(None);
        }

        let toggle = repo.toggle_entry(giveaway.id, user_id).await?;
        let entries = repo.entry_count(giveaway.id).await?;

        Ok(Some((toggle, entries)))
    }

    /// Ends a giveaway and draws its winners.
    ///
    /// # Returns
    /// - `Ok(Some(FinishedGiveaway))` - This call ended the giveaway
    /// - `Ok(None)` - Unknown id, or another finisher got there first
    pub async fn finish(&self, id: i32) -> Result<Option<FinishedGiveaway>, AppError> {
        let repo = GiveawayRepository::new(self.db);

        if !repo.mark_ended(id).await? {
            return Ok(None);
        }
        let Some(giveaway) = repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let entrants = repo.entrants(id).await?;
        let winners = draw_winners(
            &entrants,
            giveaway.winner_count as usize,
            &mut rand::rng(),
        );

        tracing::info!(
            "Giveaway {} in guild {} ended with {} entrants and {} winners",
            giveaway.id,
            giveaway.guild_id,
            entrants.len(),
            winners.len()
        );

        Ok(Some(FinishedGiveaway {
            giveaway,
            winners,
            entrant_count: entrants.len(),
        }))
    }

    /// Ends every giveaway whose end time has passed.
    ///
    /// A giveaway that fails to finish is logged and skipped.
    pub async fn finish_due(&self, now: DateTime<Utc>) -> Result<Vec<FinishedGiveaway>, AppError> {
        let due = GiveawayRepository::new(self.db).due(now).await?;

        let mut finished = Vec::with_capacity(due.len());
        for giveaway in due {
            match self.finish(giveaway.id).await {
                Ok(Some(result)) => finished.push(result),
                Ok(None) => {}
                Err(e) => tracing::error!("Failed to finish giveaway {}: {}", giveaway.id, e),
            }
        }

        Ok(finished)
    }

    /// Ends the giveaway behind `message_id`, or the channel's latest running giveaway.
    pub async fn end_now(
        &self,
        channel_id: u64,
        message_id: Option<u64>,
    ) -> Result<Option<FinishedGiveaway>, AppError> {
        let repo = GiveawayRepository::new(self.db);

        let giveaway = match message_id {
            Some(message_id) => repo.find_by_message(message_id).await?,
            None => repo.latest_active_in_channel(channel_id).await?,
        };

        match giveaway {
            Some(giveaway) => self.finish(giveaway.id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{
        builder::TestBuilder,
        factory::{giveaway::GiveawayFactory, helpers::create_giveaway_with_entries},
    };

    use super::*;

    fn start_params(duration_minutes: u32) -> StartGiveaway {
        StartGiveaway {
            guild_id: 1,
            channel_id: 2,
            host_id: 3,
            prize: " Nitro ".to_string(),
            description: None,
            duration_minutes,
            winner_count: 40,
        }
    }

    #[tokio::test]
    async fn start_clamps_winners_and_sets_end() -> Result<(), AppError> {
        let test = TestBuilder::new().with_giveaway_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();

        let giveaway = GiveawayService::new(db).start(start_params(90), now).await?;

        assert_eq!(giveaway.prize, "Nitro");
        assert_eq!(giveaway.winner_count, MAX_GIVEAWAY_WINNERS);
        assert_eq!(giveaway.ends_at, now + Duration::minutes(90));

        let too_long = GiveawayService::new(db).start(start_params(10_081), now).await;
        assert!(matches!(too_long, Err(AppError::BadRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn finish_draws_from_entrants_once() -> Result<(), AppError> {
        let test = TestBuilder::new().with_giveaway_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (giveaway, _) = create_giveaway_with_entries(db, "1", &["10", "11", "12"]).await?;
        let service = GiveawayService::new(db);

        let finished = service.finish(giveaway.id).await?.unwrap();
        assert_eq!(finished.entrant_count, 3);
        assert_eq!(finished.winners.len(), 1);
        assert!([10, 11, 12].contains(&finished.winners[0]));

        assert_eq!(service.finish(giveaway.id).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn finish_due_skips_running_giveaways() -> Result<(), AppError> {
        let test = TestBuilder::new().with_giveaway_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let now = Utc::now();
        let due = GiveawayFactory::new(db)
            .ends_at(now - Duration::minutes(1))
            .build()
            .await?;
        GiveawayFactory::new(db)
            .ends_at(now + Duration::minutes(10))
            .build()
            .await?;

        let finished = GiveawayService::new(db).finish_due(now).await?;

        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].giveaway.id, due.id);
        assert!(finished[0].winners.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn entries_are_closed_after_end() -> Result<(), AppError> {
        let test = TestBuilder::new().with_giveaway_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        GiveawayFactory::new(db)
            .message_id(Some("500".to_string()))
            .build()
            .await?;
        GiveawayFactory::new(db)
            .message_id(Some("501".to_string()))
            .ended(true)
            .build()
            .await?;
        let service = GiveawayService::new(db);

        assert_eq!(
            service.toggle_entry(500, 9).await?,
            Some((EntryToggle::Entered, 1))
        );
        assert_eq!(
            service.toggle_entry(500, 9).await?,
            Some((EntryToggle::Left, 0))
        );
        assert_eq!(service.toggle_entry(501, 9).await?, None);

        Ok(())
    }
}
