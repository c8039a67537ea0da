//! Minimal Discord REST client for the dashboard.
//!
//! The dashboard does not run a gateway connection, so everything it needs to know
//! about users, guilds and roles comes from these few REST calls. User calls
//! authenticate with the user's OAuth bearer token, guild calls with the bot token.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    model::{
        role::GuildRoleDto,
        user::{DashboardUserDto, UserGuildDto},
    },
    server::{error::AppError, model::permission::has_manage_access},
};

pub const REASON_MISSING_TOKEN: &str = "missing-token";
pub const REASON_UNAUTHORIZED_TOKEN: &str = "unauthorized-token";

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DiscordUser {
    pub fn into_dto(self) -> DashboardUserDto {
        DashboardUserDto {
            id: self.id,
            username: self.global_name.unwrap_or(self.username),
            avatar: self.avatar,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartialGuild {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    /// Bitfield serialized as a string, absent for bot tokens.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl PartialGuild {
    pub fn permission_bits(&self) -> u64 {
        self.permissions
            .as_deref()
            .and_then(|bits| bits.parse::<u64>().ok())
            .unwrap_or(0)
    }

    pub fn can_manage(&self) -> bool {
        has_manage_access(self.permission_bits())
    }

    pub fn id_u64(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    pub fn into_dto(self) -> UserGuildDto {
        let permissions = self.permission_bits().to_string();
        UserGuildDto {
            id: self.id,
            name: self.name,
            icon: self.icon,
            owner: self.owner,
            permissions,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub managed: bool,
}

impl DiscordRole {
    pub fn into_dto(self) -> GuildRoleDto {
        let color = if self.color == 0 {
            "#99aab5".to_string()
        } else {
            format!("#{:06x}", self.color)
        };

        GuildRoleDto {
            id: self.id,
            name: self.name,
            color,
            position: self.position,
            managed: self.managed,
        }
    }
}

/// Bot guild ids plus the reason the list may be incomplete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotGuilds {
    pub guild_ids: Vec<u64>,
    pub reason: Option<String>,
}

impl BotGuilds {
    pub fn contains(&self, guild_id: u64) -> bool {
        self.guild_ids.contains(&guild_id)
    }

    /// Missing or rejected tokens are configuration problems, not user errors.
    pub fn token_problem(&self) -> bool {
        matches!(
            self.reason.as_deref(),
            Some(REASON_MISSING_TOKEN) | Some(REASON_UNAUTHORIZED_TOKEN)
        )
    }
}

#[derive(Clone)]
pub struct DiscordApiClient {
    http_client: reqwest::Client,
    base_url: String,
    bot_token: Option<String>,
}

impl DiscordApiClient {
    pub fn new(http_client: reqwest::Client, base_url: String, bot_token: Option<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
        }
    }

    pub fn has_bot_token(&self) -> bool {
        self.bot_token.is_some()
    }

    /// Fetches the user behind an OAuth access token.
    pub async fn current_user(&self, access_token: &str) -> Result<DiscordUser, AppError> {
        let user = self
            .http_client
            .get(format!("{}/users/@me", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }

    /// Lists the user's guilds. Rejected or expired tokens yield an empty list so the
    /// caller can decide whether to refresh.
    pub async fn user_guilds(&self, access_token: &str) -> Result<Vec<PartialGuild>, AppError> {
        let response = self
            .http_client
            .get(format!("{}/users/@me/guilds", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("User guild list returned HTTP {}", response.status());
            return Ok(Vec::new());
        }

        Ok(response.json::<Vec<PartialGuild>>().await?)
    }

    /// Lists the guilds the bot is in, with a failure reason instead of an error.
    ///
    /// # Returns
    /// - `reason: None` - Request succeeded
    /// - `reason: Some("missing-token")` - No bot token configured
    /// - `reason: Some("unauthorized-token")` - Discord answered 401
    /// - `reason: Some("http-{status}")` - Any other non-success status, or `http-error`
    ///   when the request itself failed
    pub async fn bot_guilds(&self) -> BotGuilds {
        let Some(token) = self.bot_token.as_deref() else {
            return BotGuilds {
                guild_ids: Vec::new(),
                reason: Some(REASON_MISSING_TOKEN.to_string()),
            };
        };

        let response = match self
            .http_client
            .get(format!("{}/users/@me/guilds", self.base_url))
            .header("Authorization", format!("Bot {}", token))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch bot guilds: {}", e);
                return BotGuilds {
                    guild_ids: Vec::new(),
                    reason: Some("http-error".to_string()),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Bot token rejected by Discord (401)");
            return BotGuilds {
                guild_ids: Vec::new(),
                reason: Some(REASON_UNAUTHORIZED_TOKEN.to_string()),
            };
        }
        if !status.is_success() {
            tracing::warn!("Bot guild list returned HTTP {}", status.as_u16());
            return BotGuilds {
                guild_ids: Vec::new(),
                reason: Some(format!("http-{}", status.as_u16())),
            };
        }

        match response.json::<Vec<PartialGuild>>().await {
            Ok(guilds) => BotGuilds {
                guild_ids: guilds.iter().filter_map(PartialGuild::id_u64).collect(),
                reason: None,
            },
            Err(e) => {
                tracing::warn!("Failed to decode bot guild list: {}", e);
                BotGuilds {
                    guild_ids: Vec::new(),
                    reason: Some("http-error".to_string()),
                }
            }
        }
    }

    /// Lists a guild's roles highest first, without `@everyone`.
    ///
    /// Returns an empty list when no bot token is configured or Discord refuses.
    pub async fn guild_roles(&self, guild_id: u64) -> Result<Vec<DiscordRole>, AppError> {
        let Some(token) = self.bot_token.as_deref() else {
            return Ok(Vec::new());
        };

        let response = self
            .http_client
            .get(format!("{}/guilds/{}/roles", self.base_url, guild_id))
            .header("Authorization", format!("Bot {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                "Role list for guild {} returned HTTP {}",
                guild_id,
                response.status().as_u16()
            );
            return Ok(Vec::new());
        }

        let mut roles: Vec<DiscordRole> = response
            .json::<Vec<DiscordRole>>()
            .await?
            .into_iter()
            .filter(|role| role.name != "@everyone")
            .collect();
        roles.sort_by(|a, b| b.position.cmp(&a.position));

        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard, token: Option<&str>) -> DiscordApiClient {
        DiscordApiClient::new(
            reqwest::Client::new(),
            server.url(),
            token.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn bot_guilds_reports_missing_token() {
        let server = mockito::Server::new_async().await;

        let result = client(&server, None).bot_guilds().await;

        assert_eq!(result.reason.as_deref(), Some(REASON_MISSING_TOKEN));
        assert!(result.token_problem());
    }

    #[tokio::test]
    async fn bot_guilds_parses_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/@me/guilds")
            .match_header("authorization", "Bot secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"1","name":"A"},{"id":"2","name":"B"}]"#)
            .create_async()
            .await;

        let result = client(&server, Some("secret")).bot_guilds().await;

        mock.assert_async().await;
        assert_eq!(result.guild_ids, vec![1, 2]);
        assert_eq!(result.reason, None);
        assert!(result.contains(2));
    }

    #[tokio::test]
    async fn bot_guilds_maps_status_codes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/@me/guilds")
            .with_status(401)
            .create_async()
            .await;

        let result = client(&server, Some("bad")).bot_guilds().await;
        assert_eq!(result.reason.as_deref(), Some(REASON_UNAUTHORIZED_TOKEN));

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/@me/guilds")
            .with_status(503)
            .create_async()
            .await;

        let result = client(&server, Some("token")).bot_guilds().await;
        assert_eq!(result.reason.as_deref(), Some("http-503"));
        assert!(!result.token_problem());
    }

    #[tokio::test]
    async fn user_guilds_empty_on_expired_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/@me/guilds")
            .match_header("authorization", "Bearer expired")
            .with_status(401)
            .create_async()
            .await;

        let guilds = client(&server, None).user_guilds("expired").await.unwrap();

        assert!(guilds.is_empty());
    }

    #[tokio::test]
    async fn guild_roles_sorted_without_everyone() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/guilds/10/roles")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id":"10","name":"@everyone","color":0,"position":0,"managed":false},
                    {"id":"11","name":"Low","color":0,"position":1,"managed":false},
                    {"id":"12","name":"High","color":16711680,"position":5,"managed":true}
                ]"#,
            )
            .create_async()
            .await;

        let roles = client(&server, Some("token")).guild_roles(10).await.unwrap();

        let dtos: Vec<GuildRoleDto> = roles.into_iter().map(DiscordRole::into_dto).collect();
        assert_eq!(dtos.len(), 2);
        assert_eq!(dtos[0].name, "High");
        assert_eq!(dtos[0].color, "#ff0000");
        assert_eq!(dtos[1].color, "#99aab5");
    }

    #[test]
    fn manage_access_from_permission_string() {
        let guild = PartialGuild {
            id: "1".to_string(),
            name: "G".to_string(),
            icon: None,
            owner: false,
            permissions: Some("32".to_string()),
        };
        assert!(guild.can_manage());

        let guild = PartialGuild {
            permissions: Some("2048".to_string()),
            ..guild
        };
        assert!(!guild.can_manage());
    }
}
