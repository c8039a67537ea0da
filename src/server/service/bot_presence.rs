//! Short lived cache of the bot's guild list.
//!
//! Every queue route checks bot membership before enqueueing, so the guild list is
//! cached in memory for 30 seconds to stay clear of Discord rate limits. The cache can
//! be bypassed with `?refresh=1` on the bot presence route.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::{
    model::api::QueuedDto,
    server::{
        error::AppError,
        service::discord_api::{BotGuilds, DiscordApiClient},
    },
};

/// Time-to-live for the cached bot guild list in seconds.
const BOT_GUILD_TTL_SECONDS: u64 = 30;

pub const BOT_NOT_PRESENT: &str = "Bot not present in this server. Invite the bot first.";
pub const BOT_TOKEN_INVALID: &str =
    "Bot token not configured or invalid. Set DISCORD_BOT_TOKEN or DISCORD_TOKEN.";

#[derive(Clone)]
struct CachedGuilds {
    guilds: BotGuilds,
    fetched_at: Instant,
}

impl CachedGuilds {
    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() >= Duration::from_secs(BOT_GUILD_TTL_SECONDS)
    }
}

#[derive(Clone, Default)]
pub struct BotGuildCache {
    cached: Arc<RwLock<Option<CachedGuilds>>>,
}

impl BotGuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list, fetching a fresh one when it is stale or `refresh` is set.
    pub async fn get(&self, api: &DiscordApiClient, refresh: bool) -> BotGuilds {
        if !refresh {
            if let Some(cached) = self.cached.read().await.as_ref() {
                if !cached.is_expired() {
                    return cached.guilds.clone();
                }
            }
        }

        let guilds = api.bot_guilds().await;
        *self.cached.write().await = Some(CachedGuilds {
            guilds: guilds.clone(),
            fetched_at: Instant::now(),
        });

        guilds
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    #[cfg(test)]
    async fn seed(&self, guilds: BotGuilds, fetched_at: Instant) {
        *self.cached.write().await = Some(CachedGuilds { guilds, fetched_at });
    }
}

pub struct BotPresenceService<'a> {
    api: &'a DiscordApiClient,
    cache: &'a BotGuildCache,
}

impl<'a> BotPresenceService<'a> {
    pub fn new(api: &'a DiscordApiClient, cache: &'a BotGuildCache) -> Self {
        Self { api, cache }
    }

    pub async fn check(&self, guild_id: u64, refresh: bool) -> (bool, BotGuilds) {
        let guilds = self.cache.get(self.api, refresh).await;
        (guilds.contains(guild_id), guilds)
    }

    /// Gate for routes that hand work to the bot.
    ///
    /// # Returns
    /// - `Ok(())` - Bot is in the guild
    /// - `Err(AppError::InternalError)` - Bot token missing or rejected (500)
    /// - `Err(AppError::BadRequest)` - Bot is not in the guild (400)
    pub async fn require_present(&self, guild_id: u64) -> Result<(), AppError> {
        let (present, guilds) = self.check(guild_id, false).await;

        if guilds.token_problem() {
            return Err(AppError::InternalError(BOT_TOKEN_INVALID.to_string()));
        }
        if !present {
            return Err(AppError::BadRequest(BOT_NOT_PRESENT.to_string()));
        }

        Ok(())
    }
}

/// Builds the response for a queued action.
pub fn queued(message: impl Into<String>, request_ids: Vec<i32>) -> QueuedDto {
    QueuedDto {
        success: true,
        message: message.into(),
        request_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_api() -> DiscordApiClient {
        // Unroutable base url, any real request would fail
        DiscordApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9".to_string(), None)
    }

    #[tokio::test]
    async fn serves_fresh_cache_without_fetching() {
        let cache = BotGuildCache::new();
        let seeded = BotGuilds {
            guild_ids: vec![42],
            reason: None,
        };
        cache.seed(seeded.clone(), Instant::now()).await;

        let result = cache.get(&offline_api(), false).await;

        assert_eq!(result, seeded);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let cache = BotGuildCache::new();
        cache
            .seed(
                BotGuilds {
                    guild_ids: vec![42],
                    reason: None,
                },
                Instant::now(),
            )
            .await;

        // No token configured, so a real fetch reports missing-token
        let result = cache.get(&offline_api(), true).await;

        assert!(result.guild_ids.is_empty());
        assert!(result.token_problem());
    }

    #[tokio::test]
    async fn token_problem_maps_to_internal_error() {
        let api = offline_api();
        let cache = BotGuildCache::new();
        let service = BotPresenceService::new(&api, &cache);

        let result = service.require_present(1).await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn absent_bot_maps_to_bad_request() {
        let api = offline_api();
        let cache = BotGuildCache::new();
        cache
            .seed(
                BotGuilds {
                    guild_ids: vec![2],
                    reason: None,
                },
                Instant::now(),
            )
            .await;
        let service = BotPresenceService::new(&api, &cache);

        let result = service.require_present(1).await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == BOT_NOT_PRESENT));
    }
}
