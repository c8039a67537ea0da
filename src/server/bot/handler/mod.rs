use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Guild, GuildId, Interaction, Member, Message, Ready};
use serenity::async_trait;

use crate::server::config::BotConfig;

pub mod guild;
pub mod interaction;
pub mod member;
pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<BotConfig>,
    pub started_at: Instant,
    schedulers_started: AtomicBool,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<BotConfig>) -> Self {
        Self {
            db,
            config,
            started_at: Instant::now(),
            schedulers_started: AtomicBool::new(false),
        }
    }

    /// Returns `true` only for the first caller, so reconnects do not start jobs twice.
    fn claim_scheduler_start(&self) -> bool {
        !self.schedulers_started.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called once every guild from the ready payload is in the cache
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        if self.claim_scheduler_start() {
            ready::handle_cache_ready(&self.db, ctx, guilds).await;
        }
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.config, ctx, guild, is_new).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.db, ctx, new_member).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.db, ctx, message).await;
    }

    /// Called for slash commands, component clicks and modal submits
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(self, ctx, interaction).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    #[tokio::test]
    async fn schedulers_start_once() {
        let test = TestBuilder::new().build().await.unwrap();
        let handler = Handler::new(
            test.db.unwrap(),
            Arc::new(BotConfig {
                database_url: "sqlite::memory:".to_string(),
                discord_token: "token".to_string(),
                dashboard_url: "http://localhost:6767".to_string(),
                support_server_url: "https://discord.gg/example".to_string(),
            }),
        );

        assert!(handler.claim_scheduler_start());
        assert!(!handler.claim_scheduler_start());
    }
}
