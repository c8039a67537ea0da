//! Producer side of the cross-process setup queue.
//!
//! Dashboard routes validate their JSON bodies here, turn them into a typed
//! [`SetupRequest`] and write the encoded row. The bot picks the rows up on its next poll.

use sea_orm::DatabaseConnection;
use serenity::all::Permissions;

use crate::{
    model::{
        role::CreateRoleDto,
        setup::{
            AnnouncementDto, EmbedDto, GiveawayDto, LevelingSetupDto, SendEmbedDto, TicketingDto,
        },
    },
    server::{
        data::setup_request::SetupRequestRepository,
        error::AppError,
        model::{
            permission::parse_permission_name,
            setup_request::{
                AnnouncementKind, AnnouncementPayload, EmbedFieldPayload, EmbedPayload,
                GiveawayPayload, LevelingSetup, PendingSetupRequest, RoleSpec, SendEmbedPayload,
                SetupRequest, TicketSetup, MAX_GIVEAWAY_MINUTES, MAX_GIVEAWAY_WINNERS,
                SETUP_LEVELING,
            },
            template::DEFAULT_ROLE_COLOR,
        },
        util::parse::{parse_hex_color, parse_optional_id},
    },
};

pub const DEFAULT_MILESTONES: &str = "5,10,20,30,50,80,100";

pub struct SetupQueueService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SetupQueueService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Encodes and stores a request for the bot, returning the new row id.
    pub async fn enqueue(&self, guild_id: u64, request: &SetupRequest) -> Result<i32, AppError> {
        let data = request.encode()?;
        let row = SetupRequestRepository::new(self.db)
            .enqueue(guild_id, request.setup_type(), data)
            .await?;

        tracing::info!(
            "Queued {} request {} for guild {}",
            row.setup_type,
            row.id,
            guild_id
        );

        Ok(row.id)
    }

    /// Enqueues several requests in order, returning their ids.
    pub async fn enqueue_all(
        &self,
        guild_id: u64,
        requests: &[SetupRequest],
    ) -> Result<Vec<i32>, AppError> {
        let mut ids = Vec::with_capacity(requests.len());
        for request in requests {
            ids.push(self.enqueue(guild_id, request).await?);
        }
        Ok(ids)
    }

    /// Lists the guild's queue rows, newest first.
    pub async fn list(&self, guild_id: u64) -> Result<Vec<PendingSetupRequest>, AppError> {
        SetupRequestRepository::new(self.db)
            .list_for_guild(guild_id)
            .await
    }

    /// Removes a queue row belonging to the guild.
    ///
    /// # Returns
    /// - `Ok(())` - Row deleted
    /// - `Err(AppError::NotFound)` - No such row for this guild
    pub async fn delete(&self, guild_id: u64, id: i32) -> Result<(), AppError> {
        let deleted = SetupRequestRepository::new(self.db)
            .delete(guild_id, id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound("Pending request not found".to_string()));
        }

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn require_channel(channel_id: &str, message: &str) -> Result<(), AppError> {
    parse_optional_id(channel_id)
        .map(|_| ())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn embed_payload(embed: EmbedDto) -> EmbedPayload {
    EmbedPayload {
        title: non_empty(embed.title),
        description: non_empty(embed.description),
        color: embed.color.as_deref().and_then(parse_hex_color),
        footer: non_empty(embed.footer),
        image: non_empty(embed.image),
        thumbnail: non_empty(embed.thumbnail),
        fields: embed
            .fields
            .into_iter()
            .filter(|field| !field.name.trim().is_empty() && !field.value.trim().is_empty())
            .map(|field| EmbedFieldPayload {
                name: field.name,
                value: field.value,
                inline: field.inline,
            })
            .collect(),
    }
}

/// Validates a `/send-embed` body.
pub fn embed_request(dto: SendEmbedDto) -> Result<SetupRequest, AppError> {
    const MISSING: &str = "Missing channel_id or embed";

    require_channel(&dto.channel_id, MISSING)?;
    let embed = embed_payload(dto.embed);
    if embed.is_empty() {
        return Err(AppError::BadRequest(MISSING.to_string()));
    }

    Ok(SetupRequest::SendEmbed(SendEmbedPayload {
        channel_id: dto.channel_id.trim().to_string(),
        embed,
    }))
}

/// Validates an `/announcement` body. Unknown types fall back to a normal announcement.
pub fn announcement_request(dto: AnnouncementDto) -> Result<SetupRequest, AppError> {
    const MISSING: &str = "Missing channel_id or content";

    require_channel(&dto.channel_id, MISSING)?;
    if dto.content.trim().is_empty() {
        return Err(AppError::BadRequest(MISSING.to_string()));
    }

    let kind = match dto.kind.trim().to_lowercase().as_str() {
        "important" => AnnouncementKind::Important,
        "event" => AnnouncementKind::Event,
        _ => AnnouncementKind::Normal,
    };

    Ok(SetupRequest::Announcement(AnnouncementPayload {
        channel_id: dto.channel_id.trim().to_string(),
        content: dto.content,
        kind,
        mention_everyone: dto.mention_everyone,
    }))
}

/// Builds a role request from the dashboard form.
///
/// Invalid colors fall back to the default role color and unknown permission names are
/// dropped.
pub fn create_role_request(dto: CreateRoleDto) -> Result<SetupRequest, AppError> {
    let name = dto.name.replace('|', "").trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Role name is required".to_string()));
    }

    let permissions = dto
        .permissions
        .iter()
        .filter_map(|permission| parse_permission_name(permission))
        .fold(Permissions::empty(), |acc, permission| acc | permission);

    Ok(SetupRequest::CreateRole(RoleSpec {
        name,
        color: dto
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_ROLE_COLOR),
        hoist: dto.hoist,
        mentionable: dto.mentionable,
        permissions,
    }))
}

/// One plain mentionable role per non-blank name.
pub fn bulk_role_requests(names: &[String]) -> Result<Vec<SetupRequest>, AppError> {
    let requests: Vec<SetupRequest> = names
        .iter()
        .map(|name| name.replace('|', "").trim().to_string())
        .filter(|name| !name.is_empty())
        .map(|name| {
            SetupRequest::CreateRole(RoleSpec {
                name,
                color: DEFAULT_ROLE_COLOR,
                hoist: false,
                mentionable: true,
                permissions: Permissions::empty(),
            })
        })
        .collect();

    if requests.is_empty() {
        return Err(AppError::BadRequest("No role names provided".to_string()));
    }

    Ok(requests)
}

pub fn delete_role_request(role_id: &str) -> Result<SetupRequest, AppError> {
    let role_id = parse_optional_id(role_id)
        .ok_or_else(|| AppError::BadRequest("role_id is required".to_string()))?;
    Ok(SetupRequest::DeleteRole { role_id })
}

/// Leveling setup with the default milestone ladder when none is given.
pub fn leveling_request(dto: LevelingSetupDto) -> Result<SetupRequest, AppError> {
    let milestones = non_empty(dto.milestones).unwrap_or_else(|| DEFAULT_MILESTONES.to_string());
    let data = format!(
        "{}|{}|{}",
        milestones,
        u8::from(dto.create_info_channel.unwrap_or(true)),
        u8::from(dto.create_rules_channel.unwrap_or(false))
    );

    let request = SetupRequest::parse(SETUP_LEVELING, &data)?;
    if let SetupRequest::Leveling(LevelingSetup { milestones, .. }) = &request {
        if milestones.is_empty() {
            return Err(AppError::BadRequest(
                "No valid milestone levels provided".to_string(),
            ));
        }
    }

    Ok(request)
}

/// Validates a giveaway form. The winner count defaults to one.
pub fn giveaway_request(dto: GiveawayDto) -> Result<SetupRequest, AppError> {
    require_channel(&dto.channel_id, "Missing required fields")?;
    if dto.prize.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    if dto.duration_minutes == 0 || dto.duration_minutes > MAX_GIVEAWAY_MINUTES {
        return Err(AppError::BadRequest(format!(
            "Duration must be between 1 and {} minutes",
            MAX_GIVEAWAY_MINUTES
        )));
    }
    let winner_count = dto.winner_count.unwrap_or(1);
    if winner_count == 0 || winner_count > MAX_GIVEAWAY_WINNERS {
        return Err(AppError::BadRequest(format!(
            "Winner count must be between 1 and {}",
            MAX_GIVEAWAY_WINNERS
        )));
    }

    Ok(SetupRequest::Giveaway(GiveawayPayload {
        channel_id: dto.channel_id.trim().to_string(),
        prize: dto.prize.trim().to_string(),
        duration_minutes: dto.duration_minutes,
        winner_count,
        description: non_empty(dto.description),
    }))
}

pub fn ticketing_request(dto: TicketingDto) -> Result<SetupRequest, AppError> {
    let panel_channel_id = parse_optional_id(&dto.channel_id)
        .ok_or_else(|| AppError::BadRequest("Missing channel_id".to_string()))?;

    Ok(SetupRequest::TicketSetup(TicketSetup {
        panel_channel_id: Some(panel_channel_id),
        category_id: dto.category_id.as_deref().and_then(parse_optional_id),
        save_transcripts: dto.save_transcripts,
        transcript_channel_id: dto
            .transcript_channel_id
            .as_deref()
            .and_then(parse_optional_id),
    }))
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use crate::model::setup::EmbedFieldDto;

    use super::*;

    #[test]
    fn embed_without_content_is_rejected() {
        let result = embed_request(SendEmbedDto {
            channel_id: "10".to_string(),
            embed: EmbedDto {
                title: Some("   ".to_string()),
                color: Some("#ff0000".to_string()),
                ..Default::default()
            },
        });

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Missing channel_id or embed"));
    }

    #[test]
    fn embed_drops_blank_fields_and_parses_color() {
        let request = embed_request(SendEmbedDto {
            channel_id: "10".to_string(),
            embed: EmbedDto {
                title: Some("Patch notes".to_string()),
                color: Some("#22c55e".to_string()),
                fields: vec![
                    EmbedFieldDto {
                        name: "Added".to_string(),
                        value: "Giveaways".to_string(),
                        inline: true,
                    },
                    EmbedFieldDto {
                        name: "".to_string(),
                        value: "orphan".to_string(),
                        inline: false,
                    },
                ],
                ..Default::default()
            },
        })
        .unwrap();

        let SetupRequest::SendEmbed(payload) = request else {
            panic!("expected embed request");
        };
        assert_eq!(payload.embed.color, Some(0x22C55E));
        assert_eq!(payload.embed.fields.len(), 1);
    }

    #[test]
    fn announcement_type_falls_back_to_normal() {
        let request = announcement_request(AnnouncementDto {
            channel_id: "10".to_string(),
            content: "Hello".to_string(),
            kind: "party".to_string(),
            mention_everyone: true,
        })
        .unwrap();

        let SetupRequest::Announcement(payload) = request else {
            panic!("expected announcement");
        };
        assert_eq!(payload.kind, AnnouncementKind::Normal);
        assert!(payload.mention_everyone);
    }

    #[test]
    fn role_form_uses_default_color_and_known_permissions() {
        let request = create_role_request(CreateRoleDto {
            name: "Helper".to_string(),
            color: Some("not-a-color".to_string()),
            hoist: true,
            mentionable: false,
            permissions: vec!["Manage Messages".to_string(), "Teleport".to_string()],
        })
        .unwrap();

        assert_eq!(
            request,
            SetupRequest::CreateRole(RoleSpec {
                name: "Helper".to_string(),
                color: DEFAULT_ROLE_COLOR,
                hoist: true,
                mentionable: false,
                permissions: Permissions::MANAGE_MESSAGES,
            })
        );
    }

    #[test]
    fn bulk_roles_encode_as_plain_mentionable_roles() {
        let requests =
            bulk_role_requests(&["Artist".to_string(), "  ".to_string(), "Gamer".to_string()])
                .unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].encode().unwrap(), "Artist|10070709|False|True|0");

        assert!(bulk_role_requests(&["".to_string()]).is_err());
    }

    #[test]
    fn leveling_defaults_to_standard_milestones() {
        let request = leveling_request(LevelingSetupDto {
            milestones: None,
            create_info_channel: None,
            create_rules_channel: Some(true),
        })
        .unwrap();

        assert_eq!(request.encode().unwrap(), "5,10,20,30,50,80,100|1|1");
    }

    #[test]
    fn giveaway_limits_are_enforced() {
        let dto = |duration_minutes, winner_count| GiveawayDto {
            channel_id: "10".to_string(),
            prize: "Nitro".to_string(),
            duration_minutes,
            winner_count,
            description: None,
        };

        assert!(giveaway_request(dto(60, None)).is_ok());
        assert!(giveaway_request(dto(0, None)).is_err());
        assert!(giveaway_request(dto(10_081, None)).is_err());
        assert!(giveaway_request(dto(60, Some(21))).is_err());
    }

    #[test]
    fn ticketing_treats_blank_ids_as_absent() {
        let request = ticketing_request(TicketingDto {
            channel_id: "10".to_string(),
            category_id: Some("".to_string()),
            save_transcripts: true,
            transcript_channel_id: Some("None".to_string()),
        })
        .unwrap();

        assert_eq!(request.encode().unwrap(), "10||True|");
    }

    #[tokio::test]
    async fn enqueue_and_delete_round_trip() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::PendingSetupRequest)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = SetupQueueService::new(db);

        let id = service.enqueue(7, &SetupRequest::VerifiedRole).await?;
        let rows = service.list(7).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].setup_type, "verified_role");
        assert_eq!(rows[0].data, "auto");

        service.delete(7, id).await?;
        assert!(matches!(
            service.delete(7, id).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }
}
