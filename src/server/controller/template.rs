use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, QueuedDto},
        template::{ApplyTemplateDto, StructureDto, TemplateDto},
    },
    server::{
        controller::setup::{enqueue_one, require_queue_access},
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            setup_request::{SetupRequest, TemplateSource},
            template::ServerTemplate,
        },
        service::template::{self, catalog, parser},
        state::AppState,
    },
};

/// Tag for grouping template endpoints in OpenAPI documentation
pub static TEMPLATE_TAG: &str = "template";

/// Looks up a built in template by its case-insensitive name.
fn named_template(name: &str) -> Result<(String, ServerTemplate), AppError> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::BadRequest("Missing template name".to_string()));
    }
    if !catalog::is_known(&name) {
        return Err(AppError::BadRequest("Invalid template".to_string()));
    }

    let template = catalog::template(&name);
    Ok((name, template))
}

/// Parses and validates posted structure text.
fn structure_template(raw: &str) -> Result<ServerTemplate, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("No structure provided".to_string()));
    }

    let template = parser::parse_structure(raw)?;
    template::validate(&template)?;

    Ok(template)
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/template",
    tag = TEMPLATE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = ApplyTemplateDto,
    responses(
        (status = 200, description = "Template queued", body = QueuedDto),
        (status = 400, description = "Missing or unknown template, or bot not in guild", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn apply_template(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<ApplyTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let (name, _) = named_template(&payload.template)?;
    require_queue_access(&state, &session, guild_id).await?;

    let message = format!("Template '{}' queued. The bot will build it shortly.", name);
    let request = SetupRequest::Template(TemplateSource::Named(name));

    Ok(Json(enqueue_one(&state, guild_id, request, message).await?))
}

/// Roles and channels a built in template would create.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/template/preview",
    tag = TEMPLATE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = ApplyTemplateDto,
    responses(
        (status = 200, description = "Template contents", body = TemplateDto),
        (status = 400, description = "Missing or unknown template", body = ErrorDto)
    ),
)]
pub async fn preview_template(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<ApplyTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let (_, template) = named_template(&payload.template)?;

    Ok(Json(template.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/apply-structure",
    tag = TEMPLATE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = StructureDto,
    responses(
        (status = 200, description = "Structure queued", body = QueuedDto),
        (status = 400, description = "Empty, unparsable or oversized structure", body = ErrorDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn apply_structure(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<StructureDto>,
) -> Result<impl IntoResponse, AppError> {
    let template = structure_template(&payload.structure)?;
    require_queue_access(&state, &session, guild_id).await?;

    let request = SetupRequest::Template(TemplateSource::Custom(template));

    Ok(Json(
        enqueue_one(
            &state,
            guild_id,
            request,
            "Server structure queued for application",
        )
        .await?,
    ))
}

/// Parses structure text without queueing it.
#[utoipa::path(
    post,
    path = "/api/guild/{guild_id}/structure/preview",
    tag = TEMPLATE_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    request_body = StructureDto,
    responses(
        (status = 200, description = "Parsed structure", body = TemplateDto),
        (status = 400, description = "Empty, unparsable or oversized structure", body = ErrorDto)
    ),
)]
pub async fn preview_structure(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<StructureDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let template = structure_template(&payload.structure)?;

    Ok(Json(template.into_dto()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_template_is_case_insensitive() {
        let (name, template) = named_template("  Gaming ").unwrap();

        assert_eq!(name, "gaming");
        assert!(!template.categories.is_empty());
    }

    #[test]
    fn rejects_blank_and_unknown_templates() {
        assert!(matches!(
            named_template(" "),
            Err(AppError::BadRequest(message)) if message == "Missing template name"
        ));
        assert!(matches!(
            named_template("casino"),
            Err(AppError::BadRequest(message)) if message == "Invalid template"
        ));
    }

    #[test]
    fn rejects_blank_structure() {
        assert!(matches!(
            structure_template("\n  \n"),
            Err(AppError::BadRequest(message)) if message == "No structure provided"
        ));
    }

    #[test]
    fn parses_structure_text() {
        let template = structure_template("INFO (category)\n  #rules\n  🔊 Lounge").unwrap();

        assert_eq!(template.categories.len(), 1);
        assert_eq!(template.channel_count(), 3);
    }
}
