use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        guild::GuildDashboardDto,
        user::{DashboardDto, UserGuildDto},
    },
    server::{
        data::guild_config::GuildConfigRepository,
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            auth::DiscordAuthService, bot_presence::BotPresenceService,
            custom_command::CustomCommandService, discord_api::PartialGuild,
        },
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static DASHBOARD_TAG: &str = "dashboard";

async fn manageable_guilds(
    state: &AppState,
    session_id: &str,
) -> Result<Vec<UserGuildDto>, AppError> {
    let guilds = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.discord_api,
    )
    .user_guilds_with_refresh(session_id)
    .await?;

    Ok(guilds
        .into_iter()
        .filter(PartialGuild::can_manage)
        .map(PartialGuild::into_dto)
        .collect())
}

/// Logged in user and the guilds they can manage.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "User and manageable guilds", body = DashboardDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &session).require_user().await?;

    let guilds = manageable_guilds(&state, &user.session_id).await?;

    Ok(Json(DashboardDto {
        user: user.user,
        guilds,
    }))
}

/// Guilds the logged in user can manage.
#[utoipa::path(
    get,
    path = "/api/user/guilds",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Manageable guilds", body = Vec<UserGuildDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn user_guilds(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state, &session).require_user().await?;

    let guilds = manageable_guilds(&state, &user.session_id).await?;

    Ok(Json(guilds))
}

/// Everything the guild page shows: settings, custom commands and bot presence.
#[utoipa::path(
    get,
    path = "/dashboard/guild/{guild_id}",
    tag = DASHBOARD_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Guild overview", body = GuildDashboardDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn guild_dashboard(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let (_, guild) = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let config = GuildConfigRepository::new(&state.db)
        .get_or_default(guild_id)
        .await?;
    let custom_commands = CustomCommandService::new(&state.db)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|command| command.into_dto())
        .collect();
    let (bot_present, bot_guilds) = BotPresenceService::new(&state.discord_api, &state.bot_guild_cache)
        .check(guild_id, false)
        .await;

    Ok(Json(GuildDashboardDto {
        guild: guild.into_dto(),
        config: config.into_dto(),
        custom_commands,
        bot_present,
        bot_reason: bot_guilds.reason,
        bot_client_id: state.client_id.clone(),
    }))
}
