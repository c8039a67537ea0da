use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, QueuedDto},
        role::{BulkRolesDto, CreateRoleDto, DeleteRoleDto, GuildRoleDto},
    },
    server::{
        controller::setup::{enqueue_one, require_queue_access},
        error::AppError,
        middleware::auth::AuthGuard,
        model::setup_request::SetupRequest,
        service::{
            bot_presence::queued,
            discord_api::DiscordRole,
            setup_queue::{self, SetupQueueService},
        },
        state::AppState,
    },
};

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

/// Guild roles highest first, read with the bot token.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/roles",
    tag = ROLE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild roles without @everyone", body = Vec<GuildRoleDto>),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn list_roles(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let roles: Vec<GuildRoleDto> = state
        .discord_api
        .guild_roles(guild_id)
        .await?
        .into_iter()
        .map(DiscordRole::into_dto)
        .collect();

    Ok(Json(roles))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/roles",
    tag = ROLE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = CreateRoleDto,
    responses(
        (status = 200, description = "Role creation queued", body = QueuedDto),
        (status = 400, description = "Role name is required, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::create_role_request(payload)?;
    let message = match &request {
        SetupRequest::CreateRole(role) => format!("Role '{}' creation queued", role.name),
        _ => "Role creation queued".to_string(),
    };

    Ok(Json(enqueue_one(&state, guild_id, request, message).await?))
}

#[utoipa::path(
    delete,
    path = "/api/guild/{guild_id}/roles",
    tag = ROLE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = DeleteRoleDto,
    responses(
        (status = 200, description = "Role deletion queued", body = QueuedDto),
        (status = 400, description = "role_id is required, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<DeleteRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let request = setup_queue::delete_role_request(&payload.role_id)?;

    Ok(Json(
        enqueue_one(&state, guild_id, request, "Role deletion queued").await?,
    ))
}

/// Queues one plain role per name.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/roles/bulk",
    tag = ROLE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = BulkRolesDto,
    responses(
        (status = 200, description = "Role creations queued", body = QueuedDto),
        (status = 400, description = "No role names provided, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn bulk_roles(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<BulkRolesDto>,
) -> Result<impl IntoResponse, AppError> {
    require_queue_access(&state, &session, guild_id).await?;

    let requests = setup_queue::bulk_role_requests(&payload.role_names)?;
    let ids = SetupQueueService::new(&state.db)
        .enqueue_all(guild_id, &requests)
        .await?;

    Ok(Json(queued(
        format!("{} role creations queued", ids.len()),
        ids,
    )))
}
