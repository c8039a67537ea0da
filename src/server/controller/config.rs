use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, SuccessDto},
    server::{
        data::guild_config::GuildConfigRepository, error::AppError, middleware::auth::AuthGuard,
        state::AppState,
    },
};

/// Tag for grouping guild settings endpoints in OpenAPI documentation
pub static CONFIG_TAG: &str = "config";

/// The guild's settings document.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/config",
    tag = CONFIG_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Settings document, empty when never configured", body = Object),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn get_config(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let settings = GuildConfigRepository::new(&state.db)
        .get_or_default(guild_id)
        .await?;

    Ok(Json(settings.into_dto()))
}

/// Merges the posted keys into the guild's settings.
///
/// Top level keys replace stored ones, keys not in the body are left untouched.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/config",
    tag = CONFIG_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Settings saved", body = SuccessDto),
        (status = 400, description = "Body is not a JSON object", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn update_config(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let Value::Object(patch) = payload else {
        return Err(AppError::BadRequest(
            "Config must be a JSON object".to_string(),
        ));
    };

    GuildConfigRepository::new(&state.db)
        .merge(guild_id, patch)
        .await?;

    Ok(Json(SuccessDto::with_message("Configuration saved")))
}
