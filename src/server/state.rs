//! Dashboard state shared across all request handlers.
//!
//! The state is built once at startup and cloned into each handler through axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool,
//! the HTTP clients wrap an `Arc`, and the bot guild cache shares one `Arc<RwLock>`.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::service::{bot_presence::BotGuildCache, discord_api::DiscordApiClient};

/// OAuth2 client configured with Discord's authorize and token endpoints.
pub type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Client for OAuth token requests. Redirects are disabled.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Discord REST client for user guild lists, bot guild lists and guild roles.
    pub discord_api: DiscordApiClient,

    /// 30 second cache of the guilds the bot is in.
    pub bot_guild_cache: BotGuildCache,

    /// Application client id, used for bot invite links.
    pub client_id: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_api: DiscordApiClient,
        client_id: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_api,
            bot_guild_cache: BotGuildCache::new(),
            client_id,
        }
    }
}
