//! Routes that hand work to the bot through the setup queue.
//!
//! Each route confirms guild access, confirms the bot is in the guild, validates the body
//! and writes one or more `pending_setup_request` rows. The response only says the work
//! was queued; the bot performs it on its next poll.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, QueuedDto},
        guild::BotPresenceDto,
        role::LevelRoleDto,
        setup::{AnnouncementDto, GiveawayDto, LevelingSetupDto, SendEmbedDto, TicketingDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, LoggedInUser},
        model::setup_request::SetupRequest,
        service::{
            bot_presence::{queued, BotPresenceService},
            leveling::LevelingService,
            setup_queue::{self, SetupQueueService},
        },
        state::AppState,
        util::parse::parse_optional_id,
    },
};

/// Tag for grouping queue endpoints in OpenAPI documentation
pub static SETUP_TAG: &str = "setup";

#[derive(Deserialize)]
pub struct BotPresenceParams {
    pub refresh: Option<String>,
}

/// Guild access plus bot membership, the gate for every queue route.
pub(super) async fn require_queue_access(
    state: &AppState,
    session: &Session,
    guild_id: u64,
) -> Result<LoggedInUser, AppError> {
    let (user, _) = AuthGuard::new(state, session)
        .require_guild_access(guild_id)
        .await?;

    BotPresenceService::new(&state.discord_api, &state.bot_guild_cache)
        .require_present(guild_id)
        .await?;

    Ok(user)
}

/// Queues one request and builds the response.
pub(super) async fn enqueue_one(
    state: &AppState,
    guild_id: u64,
    request: SetupRequest,
    message: impl Into<String>,
) -> Result<QueuedDto, AppError> {
    let id = SetupQueueService::new(&state.db)
        .enqueue(guild_id, &request)
        .await?;

    Ok(queued(message, vec![id]))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/send-embed",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = SendEmbedDto,
    responses(
        (status = 200, description = "Embed queued", body = QueuedDto),
        (status = 400, description = "Missing channel_id or embed, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn send_embed(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<SendEmbedDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::embed_request(payload)?;

    Ok(Json(
        enqueue_one(&state, guild_id, request, "Embed queued for delivery").await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/announcement",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = AnnouncementDto,
    responses(
        (status = 200, description = "Announcement queued", body = QueuedDto),
        (status = 400, description = "Missing channel_id or content, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn announcement(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<AnnouncementDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::announcement_request(payload)?;

    Ok(Json(
        enqueue_one(&state, guild_id, request, "Announcement queued for delivery").await?,
    ))
}

/// Queues `Level N` milestone roles and the optional info and rules channels.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/leveling-setup",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = LevelingSetupDto,
    responses(
        (status = 200, description = "Leveling setup queued", body = QueuedDto),
        (status = 400, description = "No valid milestones, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn leveling_setup(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<LevelingSetupDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::leveling_request(payload)?;

    Ok(Json(
        enqueue_one(
            &state,
            guild_id,
            request,
            "Leveling setup request submitted! The bot will process it shortly.",
        )
        .await?,
    ))
}

/// Level reward roles configured for the guild.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/level-roles",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Level roles, lowest level first", body = Vec<LevelRoleDto>),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn list_level_roles(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let roles: Vec<LevelRoleDto> = LevelingService::new(&state.db)
        .level_roles(guild_id)
        .await?
        .into_iter()
        .map(|role| role.into_dto())
        .collect();

    Ok(Json(roles))
}

/// Maps a level to an existing role. Written directly, the bot reads it on level up.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/level-roles",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = LevelRoleDto,
    responses(
        (status = 200, description = "Level role saved", body = QueuedDto),
        (status = 400, description = "Missing level or role_id", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn add_level_role(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<LevelRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let role_id = parse_optional_id(&payload.role_id)
        .ok_or_else(|| AppError::BadRequest("Missing level or role_id".to_string()))?;

    let role = LevelingService::new(&state.db)
        .set_level_role(guild_id, payload.level, role_id)
        .await?;

    Ok(Json(queued(
        format!("Level {} role reward added", role.level),
        Vec::new(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/giveaway",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = GiveawayDto,
    responses(
        (status = 200, description = "Giveaway queued", body = QueuedDto),
        (status = 400, description = "Missing required fields or out of range values", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn giveaway(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<GiveawayDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::giveaway_request(payload)?;

    Ok(Json(
        enqueue_one(&state, guild_id, request, "Giveaway queued for creation").await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/ticketing",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = TicketingDto,
    responses(
        (status = 200, description = "Ticket panel queued", body = QueuedDto),
        (status = 400, description = "Missing channel_id, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn ticketing(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<TicketingDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::ticketing_request(payload)?;

    Ok(Json(
        enqueue_one(&state, guild_id, request, "Ticket system setup queued").await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/verified-role",
    tag = SETUP_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Verified role creation queued", body = QueuedDto),
        (status = 400, description = "Bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn verified_role(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    Ok(Json(
        enqueue_one(
            &state,
            guild_id,
            SetupRequest::VerifiedRole,
            "Verified role will be created automatically",
        )
        .await?,
    ))
}

/// Whether the bot is in the guild. `?refresh=1` bypasses the 30 second cache.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/bot-presence",
    tag = SETUP_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("refresh" = Option<String>, Query, description = "`1` to bypass the cache")
    ),
    responses(
        (status = 200, description = "Bot presence", body = BotPresenceDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn bot_presence(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<BotPresenceParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let refresh = matches!(params.refresh.as_deref(), Some("1") | Some("true"));
    let (present, guilds) = BotPresenceService::new(&state.discord_api, &state.bot_guild_cache)
        .check(guild_id, refresh)
        .await;

    Ok(Json(BotPresenceDto {
        present,
        reason: guilds.reason,
        guild_count: guilds.guild_ids.len(),
    }))
}
