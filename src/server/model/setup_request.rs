//! Cross-process setup queue models.
//!
//! The dashboard writes `(setup_type, data)` pairs into the `pending_setup_request`
//! table and the bot turns them back into a [`SetupRequest`]. Older payload formats are
//! pipe separated strings, newer ones JSON, and both are parsed here so the producer and
//! the consumer share one definition of the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::all::Permissions;

use crate::{
    model::setup::PendingSetupRequestDto,
    server::{
        error::{setup::SetupRequestError, AppError},
        model::{
            permission::parse_permission_list,
            template::{ServerTemplate, DEFAULT_ROLE_COLOR},
        },
        util::parse::{parse_optional_id, parse_u64_from_string},
    },
};

pub const SETUP_LEVELING: &str = "leveling";
pub const SETUP_CREATE_ROLE: &str = "create_role";
pub const SETUP_DELETE_ROLE: &str = "delete_role";
pub const SETUP_VERIFIED_ROLE: &str = "verified_role";
pub const SETUP_TICKET: &str = "ticket_setup";
pub const SETUP_TEMPLATE: &str = "template";
pub const SETUP_SEND_EMBED: &str = "send_embed";
pub const SETUP_ANNOUNCEMENT: &str = "announcement";
pub const SETUP_GIVEAWAY: &str = "giveaway";

/// Longest giveaway accepted, one week.
pub const MAX_GIVEAWAY_MINUTES: u32 = 10_080;
pub const MAX_GIVEAWAY_WINNERS: u32 = 20;

/// A row of the setup queue as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSetupRequest {
    pub id: i32,
    pub guild_id: u64,
    pub setup_type: String,
    pub data: String,
    pub processed: bool,
    pub created_at: DateTime<Utc>,
}

impl PendingSetupRequest {
    pub fn from_entity(entity: entity::pending_setup_request::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            setup_type: entity.setup_type,
            data: entity.data,
            processed: entity.processed,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> PendingSetupRequestDto {
        PendingSetupRequestDto {
            id: self.id,
            guild_id: self.guild_id.to_string(),
            setup_type: self.setup_type,
            data: self.data,
            processed: self.processed,
            created_at: self.created_at,
        }
    }

    /// Interprets the stored type tag and payload.
    pub fn parse(&self) -> Result<SetupRequest, SetupRequestError> {
        SetupRequest::parse(&self.setup_type, &self.data)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelingSetup {
    pub milestones: Vec<u32>,
    pub create_info_channel: bool,
    pub create_rules_channel: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleSpec {
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub mentionable: bool,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketSetup {
    pub panel_channel_id: Option<u64>,
    pub category_id: Option<u64>,
    pub save_transcripts: bool,
    pub transcript_channel_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSource {
    /// A catalog template name, resolved by the bot.
    Named(String),
    Custom(ServerTemplate),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedFieldPayload {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedFieldPayload>,
}

impl EmbedPayload {
    /// Discord rejects embeds without any visible content.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().map_or(true, str::is_empty)
            && self.description.as_deref().map_or(true, str::is_empty)
            && self.image.is_none()
            && self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendEmbedPayload {
    pub channel_id: String,
    pub embed: EmbedPayload,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    Normal,
    Important,
    Event,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementPayload {
    pub channel_id: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: AnnouncementKind,
    #[serde(default)]
    pub mention_everyone: bool,
}

fn default_winner_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiveawayPayload {
    pub channel_id: String,
    pub prize: String,
    pub duration_minutes: u32,
    #[serde(default = "default_winner_count")]
    pub winner_count: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// A typed queue request.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupRequest {
    Leveling(LevelingSetup),
    CreateRole(RoleSpec),
    DeleteRole { role_id: u64 },
    VerifiedRole,
    TicketSetup(TicketSetup),
    Template(TemplateSource),
    SendEmbed(SendEmbedPayload),
    Announcement(AnnouncementPayload),
    Giveaway(GiveawayPayload),
}

impl SetupRequest {
    /// Parses a queue row's type tag and payload.
    ///
    /// # Returns
    /// - `Ok(SetupRequest)` - Recognized type with a well formed payload
    /// - `Err(SetupRequestError)` - Unknown type, malformed payload, or a custom template
    ///   that exceeds guild limits
    pub fn parse(setup_type: &str, data: &str) -> Result<Self, SetupRequestError> {
        match setup_type {
            SETUP_LEVELING => Ok(Self::Leveling(parse_leveling(data))),
            SETUP_CREATE_ROLE => Ok(Self::CreateRole(parse_role(data)?)),
            SETUP_DELETE_ROLE => {
                let role_id = parse_optional_id(data).ok_or(SetupRequestError::InvalidField {
                    field: "role_id",
                    value: data.to_string(),
                })?;
                Ok(Self::DeleteRole { role_id })
            }
            SETUP_VERIFIED_ROLE => Ok(Self::VerifiedRole),
            SETUP_TICKET => Ok(Self::TicketSetup(parse_ticket(data))),
            SETUP_TEMPLATE => Ok(Self::Template(parse_template(data)?)),
            SETUP_SEND_EMBED => {
                let payload: SendEmbedPayload = serde_json::from_str(data)?;
                require_channel_id(&payload.channel_id)?;
                if payload.embed.is_empty() {
                    return Err(SetupRequestError::MissingField("embed"));
                }
                Ok(Self::SendEmbed(payload))
            }
            SETUP_ANNOUNCEMENT => {
                let payload: AnnouncementPayload = serde_json::from_str(data)?;
                require_channel_id(&payload.channel_id)?;
                if payload.content.trim().is_empty() {
                    return Err(SetupRequestError::MissingField("content"));
                }
                Ok(Self::Announcement(payload))
            }
            SETUP_GIVEAWAY => {
                let payload: GiveawayPayload = serde_json::from_str(data)?;
                require_channel_id(&payload.channel_id)?;
                validate_giveaway(&payload)?;
                Ok(Self::Giveaway(payload))
            }
            other => Err(SetupRequestError::UnknownType(other.to_string())),
        }
    }

    pub fn setup_type(&self) -> &'static str {
        match self {
            Self::Leveling(_) => SETUP_LEVELING,
            Self::CreateRole(_) => SETUP_CREATE_ROLE,
            Self::DeleteRole { .. } => SETUP_DELETE_ROLE,
            Self::VerifiedRole => SETUP_VERIFIED_ROLE,
            Self::TicketSetup(_) => SETUP_TICKET,
            Self::Template(_) => SETUP_TEMPLATE,
            Self::SendEmbed(_) => SETUP_SEND_EMBED,
            Self::Announcement(_) => SETUP_ANNOUNCEMENT,
            Self::Giveaway(_) => SETUP_GIVEAWAY,
        }
    }

    /// Serializes the payload into the `data` column format.
    pub fn encode(&self) -> Result<String, SetupRequestError> {
        let data = match self {
            Self::Leveling(setup) => format!(
                "{}|{}|{}",
                setup
                    .milestones
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                u8::from(setup.create_info_channel),
                u8::from(setup.create_rules_channel)
            ),
            Self::CreateRole(role) => format!(
                "{}|{}|{}|{}|{}",
                role.name.replace('|', ""),
                role.color,
                python_bool(role.hoist),
                python_bool(role.mentionable),
                role.permissions.bits()
            ),
            Self::DeleteRole { role_id } => role_id.to_string(),
            Self::VerifiedRole => "auto".to_string(),
            Self::TicketSetup(ticket) => format!(
                "{}|{}|{}|{}",
                optional_id(ticket.panel_channel_id),
                optional_id(ticket.category_id),
                python_bool(ticket.save_transcripts),
                optional_id(ticket.transcript_channel_id)
            ),
            Self::Template(TemplateSource::Named(name)) => name.clone(),
            Self::Template(TemplateSource::Custom(template)) => serde_json::to_string(template)?,
            Self::SendEmbed(payload) => serde_json::to_string(payload)?,
            Self::Announcement(payload) => serde_json::to_string(payload)?,
            Self::Giveaway(payload) => serde_json::to_string(payload)?,
        };

        Ok(data)
    }
}

/// Flags in role and ticket payloads are true only for the literal `True`.
fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn optional_id(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn require_channel_id(channel_id: &str) -> Result<u64, SetupRequestError> {
    parse_optional_id(channel_id).ok_or(SetupRequestError::InvalidField {
        field: "channel_id",
        value: channel_id.to_string(),
    })
}

/// `"5,10,20|1|0"`: milestones, create info channel (default on), create rules
/// channel (default off). Non-numeric milestones are skipped.
fn parse_leveling(data: &str) -> LevelingSetup {
    let parts: Vec<&str> = data.split('|').collect();

    let mut milestones: Vec<u32> = parts
        .first()
        .map(|list| {
            list.split(',')
                .filter_map(|level| level.trim().parse::<u32>().ok())
                .filter(|level| *level > 0)
                .collect()
        })
        .unwrap_or_default();
    milestones.sort_unstable();
    milestones.dedup();

    LevelingSetup {
        milestones,
        create_info_channel: parts.get(1).map(|flag| flag.trim() == "1").unwrap_or(true),
        create_rules_channel: parts.get(2).map(|flag| flag.trim() == "1").unwrap_or(false),
    }
}

/// `"name|color_int|hoist|mentionable|permissions"`.
fn parse_role(data: &str) -> Result<RoleSpec, SetupRequestError> {
    let parts: Vec<&str> = data.split('|').collect();

    let name = parts.first().map(|name| name.trim()).unwrap_or_default();
    if name.is_empty() {
        return Err(SetupRequestError::MissingField("name"));
    }

    let color = parts
        .get(1)
        .and_then(|color| {
            let color = color.trim();
            color
                .strip_prefix("0x")
                .map(|hex| u32::from_str_radix(hex, 16).ok())
                .unwrap_or_else(|| color.parse::<u32>().ok())
        })
        .unwrap_or(DEFAULT_ROLE_COLOR);

    Ok(RoleSpec {
        name: name.to_string(),
        color,
        hoist: parts.get(2).is_some_and(|flag| flag.trim() == "True"),
        mentionable: parts.get(3).is_some_and(|flag| flag.trim() == "True"),
        permissions: parts
            .get(4)
            .map(|permissions| parse_permission_list(permissions))
            .unwrap_or_else(Permissions::empty),
    })
}

/// `"channel_id|category_id|save_transcripts|transcript_channel"`.
fn parse_ticket(data: &str) -> TicketSetup {
    let parts: Vec<&str> = data.split('|').collect();
    let id_at = |index: usize| parts.get(index).and_then(|id| parse_optional_id(id));

    TicketSetup {
        panel_channel_id: id_at(0),
        category_id: id_at(1),
        save_transcripts: parts
            .get(2)
            .is_some_and(|flag| matches!(flag.trim(), "True" | "true" | "1")),
        transcript_channel_id: id_at(3),
    }
}

fn parse_template(data: &str) -> Result<TemplateSource, SetupRequestError> {
    let trimmed = data.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let template: ServerTemplate = serde_json::from_str(trimmed)?;
        crate::server::service::template::validate(&template)?;
        return Ok(TemplateSource::Custom(template));
    }

    if trimmed.is_empty() {
        return Err(SetupRequestError::MissingField("template"));
    }

    Ok(TemplateSource::Named(trimmed.to_lowercase()))
}

fn validate_giveaway(payload: &GiveawayPayload) -> Result<(), SetupRequestError> {
    if payload.prize.trim().is_empty() {
        return Err(SetupRequestError::MissingField("prize"));
    }
    if payload.duration_minutes == 0 || payload.duration_minutes > MAX_GIVEAWAY_MINUTES {
        return Err(SetupRequestError::InvalidField {
            field: "duration_minutes",
            value: payload.duration_minutes.to_string(),
        });
    }
    if payload.winner_count == 0 || payload.winner_count > MAX_GIVEAWAY_WINNERS {
        return Err(SetupRequestError::InvalidField {
            field: "winner_count",
            value: payload.winner_count.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leveling_with_flags() {
        let request = SetupRequest::parse(SETUP_LEVELING, "20,5,x,10|0|1").unwrap();
        assert_eq!(
            request,
            SetupRequest::Leveling(LevelingSetup {
                milestones: vec![5, 10, 20],
                create_info_channel: false,
                create_rules_channel: true,
            })
        );
    }

    #[test]
    fn leveling_flags_default_to_info_only() {
        let SetupRequest::Leveling(setup) = SetupRequest::parse(SETUP_LEVELING, "5,10").unwrap()
        else {
            panic!("expected leveling request");
        };
        assert!(setup.create_info_channel);
        assert!(!setup.create_rules_channel);
    }

    #[test]
    fn parses_role_with_python_booleans() {
        let request =
            SetupRequest::parse(SETUP_CREATE_ROLE, "Moderator|16711680|True|False|Kick Members")
                .unwrap();
        assert_eq!(
            request,
            SetupRequest::CreateRole(RoleSpec {
                name: "Moderator".to_string(),
                color: 0xFF0000,
                hoist: true,
                mentionable: false,
                permissions: Permissions::KICK_MEMBERS,
            })
        );
    }

    #[test]
    fn role_color_falls_back_to_grey() {
        let SetupRequest::CreateRole(role) =
            SetupRequest::parse(SETUP_CREATE_ROLE, "Member|nope|true|TRUE|").unwrap()
        else {
            panic!("expected role request");
        };
        assert_eq!(role.color, DEFAULT_ROLE_COLOR);
        // Only the exact text `True` enables a flag
        assert!(!role.hoist);
        assert!(!role.mentionable);
    }

    #[test]
    fn role_without_name_is_rejected() {
        let result = SetupRequest::parse(SETUP_CREATE_ROLE, "|123|True|True|");
        assert!(matches!(result, Err(SetupRequestError::MissingField("name"))));
    }

    #[test]
    fn parses_ticket_setup_with_none_fields() {
        let request = SetupRequest::parse(SETUP_TICKET, "111|None|True|").unwrap();
        assert_eq!(
            request,
            SetupRequest::TicketSetup(TicketSetup {
                panel_channel_id: Some(111),
                category_id: None,
                save_transcripts: true,
                transcript_channel_id: None,
            })
        );
    }

    #[test]
    fn template_name_is_lowercased() {
        let request = SetupRequest::parse(SETUP_TEMPLATE, " Gaming ").unwrap();
        assert_eq!(
            request,
            SetupRequest::Template(TemplateSource::Named("gaming".to_string()))
        );
    }

    #[test]
    fn custom_template_over_role_limit_is_rejected() {
        let roles: Vec<_> = (0..201)
            .map(|i| serde_json::json!({ "name": format!("r{}", i) }))
            .collect();
        let data = serde_json::json!({ "roles": roles, "categories": [] }).to_string();

        let result = SetupRequest::parse(SETUP_TEMPLATE, &data);
        assert!(matches!(result, Err(SetupRequestError::Template(_))));
    }

    #[test]
    fn template_list_payload_is_invalid_json_shape() {
        let result = SetupRequest::parse(SETUP_TEMPLATE, "[1, 2]");
        assert!(matches!(result, Err(SetupRequestError::InvalidJson(_))));
    }

    #[test]
    fn announcement_type_defaults_to_normal() {
        let SetupRequest::Announcement(payload) = SetupRequest::parse(
            SETUP_ANNOUNCEMENT,
            r#"{"channel_id":"42","content":"Hello"}"#,
        )
        .unwrap() else {
            panic!("expected announcement");
        };
        assert_eq!(payload.kind, AnnouncementKind::Normal);
        assert!(!payload.mention_everyone);
    }

    #[test]
    fn empty_embed_is_rejected() {
        let result =
            SetupRequest::parse(SETUP_SEND_EMBED, r#"{"channel_id":"42","embed":{"color":5}}"#);
        assert!(matches!(result, Err(SetupRequestError::MissingField("embed"))));
    }

    #[test]
    fn giveaway_duration_is_bounded() {
        let result = SetupRequest::parse(
            SETUP_GIVEAWAY,
            r#"{"channel_id":"42","prize":"Nitro","duration_minutes":10081}"#,
        );
        assert!(matches!(
            result,
            Err(SetupRequestError::InvalidField {
                field: "duration_minutes",
                ..
            })
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = SetupRequest::parse("launch_rockets", "");
        assert!(matches!(result, Err(SetupRequestError::UnknownType(_))));
    }

    #[test]
    fn encoded_role_parses_back() {
        let role = SetupRequest::CreateRole(RoleSpec {
            name: "Helper".to_string(),
            color: 0x43B581,
            hoist: false,
            mentionable: true,
            permissions: Permissions::MANAGE_MESSAGES | Permissions::KICK_MEMBERS,
        });

        let data = role.encode().unwrap();
        assert_eq!(SetupRequest::parse(role.setup_type(), &data).unwrap(), role);
    }

    #[test]
    fn encoded_ticket_setup_leaves_absent_ids_empty() {
        let ticket = SetupRequest::TicketSetup(TicketSetup {
            panel_channel_id: Some(5),
            category_id: None,
            save_transcripts: false,
            transcript_channel_id: None,
        });
        assert_eq!(ticket.encode().unwrap(), "5||False|");
    }
}
