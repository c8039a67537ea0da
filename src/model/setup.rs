use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PendingSetupRequestDto {
    pub id: i32,
    pub guild_id: String,
    pub setup_type: String,
    pub data: String,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingListDto {
    pub requests: Vec<PendingSetupRequestDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingQuery {
    pub id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedFieldDto {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmbedDto {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Hex color such as `#22c55e`.
    pub color: Option<String>,
    pub footer: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedFieldDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendEmbedDto {
    pub channel_id: String,
    pub embed: EmbedDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementDto {
    pub channel_id: String,
    pub content: String,
    /// `normal`, `important` or `event`.
    #[serde(rename = "type", default = "default_announcement_type")]
    pub kind: String,
    #[serde(default)]
    pub mention_everyone: bool,
}

fn default_announcement_type() -> String {
    "normal".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LevelingSetupDto {
    /// Comma separated levels, defaults to `5,10,20,30,50,80,100`.
    pub milestones: Option<String>,
    pub create_info_channel: Option<bool>,
    pub create_rules_channel: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GiveawayDto {
    pub channel_id: String,
    pub prize: String,
    pub duration_minutes: u32,
    pub winner_count: Option<u32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketingDto {
    pub channel_id: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub save_transcripts: bool,
    pub transcript_channel_id: Option<String>,
}
