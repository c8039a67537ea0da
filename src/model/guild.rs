use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{command::CustomCommandDto, user::UserGuildDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuildDashboardDto {
    pub guild: UserGuildDto,
    #[schema(value_type = Object)]
    pub config: serde_json::Value,
    pub custom_commands: Vec<CustomCommandDto>,
    pub bot_present: bool,
    pub bot_reason: Option<String>,
    /// Client id used to build the bot invite link.
    pub bot_client_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BotPresenceDto {
    pub present: bool,
    pub reason: Option<String>,
    pub guild_count: usize,
}
