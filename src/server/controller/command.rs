use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        command::{CreateCustomCommandDto, CustomCommandDto, DeleteCustomCommandDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::custom_command::CustomCommandService, state::AppState,
    },
};

/// Tag for grouping custom command endpoints in OpenAPI documentation
pub static COMMAND_TAG: &str = "custom_command";

#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/commands",
    tag = COMMAND_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Custom commands ordered by name", body = Vec<CustomCommandDto>),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn list_commands(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let commands: Vec<CustomCommandDto> = CustomCommandService::new(&state.db)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|command| command.into_dto())
        .collect();

    Ok(Json(commands))
}

/// Creates a custom command or replaces the response of an existing one.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/commands",
    tag = COMMAND_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = CreateCustomCommandDto,
    responses(
        (status = 201, description = "Command saved", body = CustomCommandDto),
        (status = 400, description = "Missing name or response", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn create_command(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateCustomCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let (user, _) = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let command = CustomCommandService::new(&state.db)
        .save(
            guild_id,
            &payload.name,
            &payload.response,
            payload.embed,
            Some(user.user_id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(command.into_dto())))
}

/// Deletes a custom command named in the body.
#[utoipa::path(
    delete,
    path = "/api/guild/{guild_id}/commands",
    tag = COMMAND_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = DeleteCustomCommandDto,
    responses(
        (status = 200, description = "Command deleted", body = SuccessDto),
        (status = 400, description = "Missing name", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto)
    ),
)]
pub async fn delete_command(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<DeleteCustomCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    CustomCommandService::new(&state.db)
        .delete(guild_id, &payload.name)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Deletes a custom command named in the path.
#[utoipa::path(
    delete,
    path = "/api/guild/{guild_id}/commands/{name}",
    tag = COMMAND_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("name" = String, Path, description = "Command name")
    ),
    responses(
        (status = 200, description = "Command deleted", body = SuccessDto),
        (status = 404, description = "Command not found", body = ErrorDto)
    ),
)]
pub async fn delete_command_by_name(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, name)): Path<(u64, String)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    CustomCommandService::new(&state.db)
        .delete(guild_id, &name)
        .await?;

    Ok(Json(SuccessDto::ok()))
}
