//! Consumer side of the cross-process setup queue.
//!
//! The bot polls the `pending_setup_request` table and performs each request against
//! Discord. Every row is marked processed once it has been looked at, whatever the
//! outcome, so a request that keeps failing is never retried forever.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use serenity::{
    all::{ChannelId, ChannelType, CreateChannel, CreateMessage, EditRole, GuildId, RoleId},
    http::Http,
};
use std::{collections::HashSet, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::server::{
    bot::ui::{
        embed::{announcement, custom_embed},
        leveling::leveling_info_embed,
        rules::{rules_embed, rules_select},
        ticket::ticket_panel,
    },
    data::{guild_config::GuildConfigRepository, setup_request::SetupRequestRepository},
    error::AppError,
    model::{
        guild_config::{
            GuildSettings, KEY_TICKET_CATEGORY_ID, KEY_TICKET_SAVE_TRANSCRIPTS,
            KEY_TICKET_TRANSCRIPT_CHANNEL_ID, KEY_VERIFIED_ROLE_ID, KEY_VERIFY,
        },
        setup_request::{
            GiveawayPayload, LevelingSetup, PendingSetupRequest, RoleSpec, SetupRequest,
            TemplateSource, TicketSetup,
        },
        template::DEFAULT_ROLE_COLOR,
    },
    service::{
        giveaway::StartGiveaway,
        giveaway_message::GiveawayMessageService,
        leveling::LevelingService,
        template::{self, builder, catalog},
    },
    util::parse::parse_optional_id,
};

const AUDIT_REASON: &str = "Requested from dashboard";
const LEVELING_INFO_CHANNEL: &str = "📈-levels";
const RULES_CHANNEL: &str = "📜-rules";

/// Outcome counts of one poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueRun {
    pub executed: usize,
    pub failed: usize,
    /// Rows for guilds the bot is not in.
    pub skipped: usize,
}

/// Keeps queue polls from overlapping.
///
/// A poll that outlives the cron interval would otherwise run alongside the next tick,
/// and both would read the same unprocessed rows.
#[derive(Debug, Clone, Default)]
pub struct QueueGuard {
    running: Arc<Mutex<()>>,
}

impl QueueGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` while another poll holds the guard.
    pub fn try_begin(&self) -> Option<OwnedMutexGuard<()>> {
        self.running.clone().try_lock_owned().ok()
    }
}

pub struct SetupExecutorService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
    /// Host recorded on queued giveaways
    bot_user_id: u64,
}

impl<'a> SetupExecutorService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>, bot_user_id: u64) -> Self {
        Self {
            db,
            http,
            bot_user_id,
        }
    }

    /// Runs every unprocessed request once.
    ///
    /// # Arguments
    /// - `bot_guilds` - Guilds the bot is currently in, taken from the gateway cache
    ///
    /// # Returns
    /// - `Ok(QueueRun)` - Counts of executed, failed and skipped rows
    /// - `Err(AppError::DbErr)` - The queue could not be read or a row not marked
    pub async fn process_pending(
        &self,
        bot_guilds: &HashSet<GuildId>,
    ) -> Result<QueueRun, AppError> {
        let repo = SetupRequestRepository::new(self.db);
        let mut run = QueueRun::default();

        for row in repo.get_unprocessed().await? {
            let id = row.id;

            match PendingSetupRequest::from_entity(row) {
                Ok(request) => self.handle(&request, bot_guilds, &mut run).await,
                Err(e) => {
                    run.failed += 1;
                    tracing::error!("Discarding unreadable setup request {}: {}", id, e);
                }
            }

            repo.mark_processed(id).await?;
        }

        Ok(run)
    }

    /// Runs [`Self::process_pending`] unless another poll holding `guard` is still busy.
    ///
    /// # Returns
    /// - `Ok(Some(QueueRun))` - This call drained the queue
    /// - `Ok(None)` - Skipped, a previous poll is still running
    pub async fn process_exclusive(
        &self,
        guard: &QueueGuard,
        bot_guilds: &HashSet<GuildId>,
    ) -> Result<Option<QueueRun>, AppError> {
        let Some(_running) = guard.try_begin() else {
            return Ok(None);
        };

        self.process_pending(bot_guilds).await.map(Some)
    }

    async fn handle(
        &self,
        request: &PendingSetupRequest,
        bot_guilds: &HashSet<GuildId>,
        run: &mut QueueRun,
    ) {
        let guild_id = GuildId::new(request.guild_id);

        if !bot_guilds.contains(&guild_id) {
            tracing::debug!(
                "Skipping {} request {} for guild {} the bot is not in",
                request.setup_type,
                request.id,
                guild_id
            );
            run.skipped += 1;
            return;
        }

        match self.execute(request).await {
            Ok(()) => {
                run.executed += 1;
                tracing::info!(
                    "Processed {} request {} for guild {}",
                    request.setup_type,
                    request.id,
                    guild_id
                );
            }
            Err(e) => {
                run.failed += 1;
                tracing::error!(
                    "Failed {} request {} for guild {}: {}",
                    request.setup_type,
                    request.id,
                    guild_id,
                    e
                );
            }
        }
    }

    async fn execute(&self, request: &PendingSetupRequest) -> Result<(), AppError> {
        let guild_id = GuildId::new(request.guild_id);
        match request.parse()? {
            SetupRequest::Leveling(setup) => self.setup_leveling(guild_id, &setup).await,
            SetupRequest::CreateRole(spec) => {
                let role = guild_id
                    .create_role(self.http.as_ref(), role_from_spec(&spec))
                    .await?;
                tracing::debug!("Created role '{}' ({}) in guild {}", role.name, role.id, guild_id);
                Ok(())
            }
            SetupRequest::DeleteRole { role_id } => {
                guild_id
                    .delete_role(self.http.as_ref(), RoleId::new(role_id))
                    .await?;
                Ok(())
            }
            SetupRequest::VerifiedRole => self.create_verified_role(guild_id).await,
            SetupRequest::TicketSetup(setup) => self.setup_tickets(guild_id, &setup).await,
            SetupRequest::Template(source) => self.apply_template(guild_id, source).await,
            SetupRequest::SendEmbed(payload) => {
                channel(&payload.channel_id)?
                    .send_message(
                        self.http.as_ref(),
                        CreateMessage::new().embed(custom_embed(&payload.embed)),
                    )
                    .await?;
                Ok(())
            }
            SetupRequest::Announcement(payload) => {
                channel(&payload.channel_id)?
                    .send_message(self.http.as_ref(), announcement(&payload))
                    .await?;
                Ok(())
            }
            SetupRequest::Giveaway(payload) => self.start_giveaway(guild_id, payload).await,
        }
    }

    /// Creates a `Level N` role per milestone and records it as that level's reward.
    async fn setup_leveling(&self, guild_id: GuildId, setup: &LevelingSetup) -> Result<(), AppError> {
        let leveling = LevelingService::new(self.db);

        for level in &setup.milestones {
            let role = guild_id
                .create_role(
                    self.http.as_ref(),
                    EditRole::new()
                        .name(format!("Level {}", level))
                        .colour(DEFAULT_ROLE_COLOR)
                        .audit_log_reason(AUDIT_REASON),
                )
                .await?;

            leveling
                .set_level_role(guild_id.get(), *level as i32, role.id.get())
                .await?;
        }

        if setup.create_info_channel {
            let info = self.create_text_channel(guild_id, LEVELING_INFO_CHANNEL).await?;
            info.send_message(
                self.http.as_ref(),
                CreateMessage::new().embed(leveling_info_embed(&setup.milestones)),
            )
            .await?;
        }

        if setup.create_rules_channel {
            let rules = GuildConfigRepository::new(self.db)
                .get_or_default(guild_id.get())
                .await?
                .rules();
            let channel = self.create_text_channel(guild_id, RULES_CHANNEL).await?;
            channel
                .send_message(
                    self.http.as_ref(),
                    CreateMessage::new()
                        .embed(rules_embed(&rules))
                        .components(vec![rules_select(&rules)]),
                )
                .await?;
        }

        Ok(())
    }

    async fn create_verified_role(&self, guild_id: GuildId) -> Result<(), AppError> {
        let role = guild_id
            .create_role(
                self.http.as_ref(),
                EditRole::new()
                    .name(catalog::VERIFIED_ROLE_NAME)
                    .colour(catalog::VERIFIED_ROLE_COLOR)
                    .hoist(false)
                    .mentionable(false)
                    .audit_log_reason(AUDIT_REASON),
            )
            .await?;

        let repo = GuildConfigRepository::new(self.db);
        let settings = repo.get_or_default(guild_id.get()).await?;
        repo.merge(guild_id.get(), verified_role_patch(&settings, role.id.get())?)
            .await?;

        Ok(())
    }

    async fn setup_tickets(&self, guild_id: GuildId, setup: &TicketSetup) -> Result<(), AppError> {
        GuildConfigRepository::new(self.db)
            .merge(guild_id.get(), ticket_patch(setup))
            .await?;

        if let Some(panel_channel_id) = setup.panel_channel_id {
            ChannelId::new(panel_channel_id)
                .send_message(self.http.as_ref(), ticket_panel())
                .await?;
        }

        Ok(())
    }

    async fn apply_template(&self, guild_id: GuildId, source: TemplateSource) -> Result<(), AppError> {
        let template = match source {
            TemplateSource::Named(name) => catalog::template(&name),
            TemplateSource::Custom(template) => template,
        };
        template::validate(&template)?;

        let report = builder::build(self.http.as_ref(), guild_id, &template).await;
        if report.failed > 0 {
            tracing::warn!(
                "Template build in guild {} skipped {} failed items",
                guild_id,
                report.failed
            );
        }

        Ok(())
    }

    async fn start_giveaway(&self, guild_id: GuildId, payload: GiveawayPayload) -> Result<(), AppError> {
        let channel_id = channel(&payload.channel_id)?;

        GiveawayMessageService::new(self.db, self.http.clone())
            .start(
                StartGiveaway {
                    guild_id: guild_id.get(),
                    channel_id: channel_id.get(),
                    host_id: self.bot_user_id,
                    prize: payload.prize,
                    description: payload.description,
                    duration_minutes: payload.duration_minutes,
                    winner_count: payload.winner_count,
                },
                Utc::now(),
            )
            .await?;

        Ok(())
    }

    async fn create_text_channel(&self, guild_id: GuildId, name: &str) -> Result<ChannelId, AppError> {
        let channel = guild_id
            .create_channel(
                self.http.as_ref(),
                CreateChannel::new(name)
                    .kind(ChannelType::Text)
                    .audit_log_reason(AUDIT_REASON),
            )
            .await?;

        Ok(channel.id)
    }
}

fn channel(raw: &str) -> Result<ChannelId, AppError> {
    parse_optional_id(raw)
        .map(ChannelId::new)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid channel id '{}'", raw)))
}

pub fn role_from_spec(spec: &RoleSpec) -> EditRole<'static> {
    EditRole::new()
        .name(&spec.name)
        .colour(spec.color)
        .hoist(spec.hoist)
        .mentionable(spec.mentionable)
        .permissions(spec.permissions)
        .audit_log_reason(AUDIT_REASON)
}

/// Stores the new role as the guild's verified role, and as the verification panel's
/// role when the panel has none yet.
pub fn verified_role_patch(
    settings: &GuildSettings,
    role_id: u64,
) -> Result<Map<String, Value>, AppError> {
    let mut patch = Map::new();
    patch.insert(
        KEY_VERIFIED_ROLE_ID.to_string(),
        Value::String(role_id.to_string()),
    );

    let mut verify = settings.verify();
    if verify.verified_role_id().is_none() {
        verify.verified_role = Some(role_id.to_string());
        patch.insert(KEY_VERIFY.to_string(), serde_json::to_value(&verify)?);
    }

    Ok(patch)
}

/// Ticket settings from a queued setup. Absent ids leave the stored value untouched.
pub fn ticket_patch(setup: &TicketSetup) -> Map<String, Value> {
    let mut patch = Map::new();
    if let Some(category_id) = setup.category_id {
        patch.insert(
            KEY_TICKET_CATEGORY_ID.to_string(),
            Value::String(category_id.to_string()),
        );
    }
    if let Some(channel_id) = setup.transcript_channel_id {
        patch.insert(
            KEY_TICKET_TRANSCRIPT_CHANNEL_ID.to_string(),
            Value::String(channel_id.to_string()),
        );
    }
    patch.insert(
        KEY_TICKET_SAVE_TRANSCRIPTS.to_string(),
        Value::Bool(setup.save_transcripts),
    );
    patch
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use serenity::all::Permissions;
    use test_utils::{builder::TestBuilder, factory::setup_request::SetupRequestFactory};

    use super::*;
    use crate::server::model::setup_request::{SETUP_GIVEAWAY, SETUP_VERIFIED_ROLE};

    fn settings(values: Value) -> GuildSettings {
        let mut settings = GuildSettings::empty(1);
        if let Value::Object(map) = values {
            settings.merge(map);
        }
        settings
    }

    /// Tests rows for guilds the bot left.
    ///
    /// Expected: Ok with the row counted as skipped and marked processed
    #[tokio::test]
    async fn skips_and_marks_requests_for_unknown_guilds() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        SetupRequestFactory::new(db)
            .guild_id("99")
            .setup_type(SETUP_VERIFIED_ROLE)
            .data("")
            .build()
            .await?;

        let executor = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);
        let run = executor.process_pending(&HashSet::new()).await?;

        assert_eq!(run, QueueRun { executed: 0, failed: 0, skipped: 1 });
        assert!(SetupRequestRepository::new(db).get_unprocessed().await?.is_empty());

        Ok(())
    }

    /// Tests a malformed payload for a guild the bot is in.
    ///
    /// Expected: Ok with the row counted as failed and still marked processed
    #[tokio::test]
    async fn marks_malformed_requests_processed() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        SetupRequestFactory::new(db)
            .guild_id("42")
            .setup_type(SETUP_GIVEAWAY)
            .data("not json")
            .build()
            .await?;

        let guilds = HashSet::from([GuildId::new(42)]);
        let executor = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);
        let run = executor.process_pending(&guilds).await?;

        assert_eq!(run, QueueRun { executed: 0, failed: 1, skipped: 0 });
        assert!(SetupRequestRepository::new(db).get_unprocessed().await?.is_empty());

        Ok(())
    }

    /// Tests a row whose guild id is not a number queued ahead of a valid row.
    ///
    /// Expected: Ok with the bad row counted as failed, the valid row still handled and
    /// both marked processed
    #[tokio::test]
    async fn unreadable_row_does_not_block_queue() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        SetupRequestFactory::new(db)
            .guild_id("abc")
            .setup_type(SETUP_VERIFIED_ROLE)
            .data("")
            .build()
            .await?;
        SetupRequestFactory::new(db)
            .guild_id("99")
            .setup_type(SETUP_VERIFIED_ROLE)
            .data("")
            .build()
            .await?;

        let executor = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);
        let run = executor.process_pending(&HashSet::new()).await?;

        assert_eq!(run, QueueRun { executed: 0, failed: 1, skipped: 1 });
        assert!(SetupRequestRepository::new(db).get_unprocessed().await?.is_empty());

        Ok(())
    }

    /// Tests a poll while a previous poll still holds the guard.
    ///
    /// Expected: Ok(None) and the row left for the running poll
    #[tokio::test]
    async fn exclusive_poll_skips_while_guard_held() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        SetupRequestFactory::new(db).guild_id("99").build().await?;

        let guard = QueueGuard::new();
        let executor = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);

        let running = guard.try_begin();
        assert!(running.is_some());

        let run = executor.process_exclusive(&guard, &HashSet::new()).await?;

        assert_eq!(run, None);
        assert_eq!(SetupRequestRepository::new(db).get_unprocessed().await?.len(), 1);

        drop(running);
        let run = executor.process_exclusive(&guard, &HashSet::new()).await?;

        assert_eq!(run, Some(QueueRun { executed: 0, failed: 0, skipped: 1 }));

        Ok(())
    }

    /// Tests two overlapping polls sharing one guard.
    ///
    /// Expected: Ok with every row handled exactly once across both polls
    #[tokio::test]
    async fn overlapping_polls_handle_each_row_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        for _ in 0..3 {
            SetupRequestFactory::new(db).guild_id("99").build().await?;
        }

        let guard = QueueGuard::new();
        let first = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);
        let second = SetupExecutorService::new(db, Arc::new(Http::new("")), 1);
        let guilds = HashSet::new();

        let (a, b) = tokio::join!(
            first.process_exclusive(&guard, &guilds),
            second.process_exclusive(&guard, &guilds)
        );

        let handled: usize = [a?, b?]
            .into_iter()
            .flatten()
            .map(|run| run.executed + run.failed + run.skipped)
            .sum();

        assert_eq!(handled, 3);
        assert!(SetupRequestRepository::new(db).get_unprocessed().await?.is_empty());

        Ok(())
    }

    #[test]
    fn verified_role_fills_empty_panel_role() {
        let patch = verified_role_patch(&settings(json!({})), 55).unwrap();

        assert_eq!(patch[KEY_VERIFIED_ROLE_ID], "55");
        assert_eq!(patch[KEY_VERIFY]["verified_role"], "55");
    }

    #[test]
    fn verified_role_keeps_configured_panel_role() {
        let existing = settings(json!({ "verify": { "verified_role": "12" } }));

        let patch = verified_role_patch(&existing, 55).unwrap();

        assert_eq!(patch[KEY_VERIFIED_ROLE_ID], "55");
        assert!(!patch.contains_key(KEY_VERIFY));
    }

    #[test]
    fn ticket_patch_skips_absent_ids() {
        let patch = ticket_patch(&TicketSetup {
            panel_channel_id: Some(1),
            category_id: Some(2),
            save_transcripts: false,
            transcript_channel_id: None,
        });

        assert_eq!(patch[KEY_TICKET_CATEGORY_ID], "2");
        assert_eq!(patch[KEY_TICKET_SAVE_TRANSCRIPTS], false);
        assert!(!patch.contains_key(KEY_TICKET_TRANSCRIPT_CHANNEL_ID));
    }

    #[test]
    fn role_from_spec_keeps_permissions() {
        let spec = RoleSpec {
            name: "Helper".to_string(),
            color: 0x123456,
            hoist: true,
            mentionable: true,
            permissions: Permissions::MANAGE_MESSAGES,
        };

        let json = serde_json::to_value(role_from_spec(&spec)).unwrap();

        assert_eq!(json["name"], "Helper");
        assert_eq!(json["color"], 0x123456);
        assert_eq!(json["mentionable"], true);
    }
}
