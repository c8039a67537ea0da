use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::IndexDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession},
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters Discord sends to the OAuth callback.
///
/// Both are optional so a missing code produces a readable 400 instead of an extractor
/// rejection.
#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
}

/// Landing endpoint reporting the login state.
#[utoipa::path(
    get,
    path = "/",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current login state", body = IndexDto),
        (status = 500, description = "Session error", body = ErrorDto)
    ),
)]
pub async fn index(session: Session) -> Result<impl IntoResponse, AppError> {
    let user = AuthSession::new(&session).user().await?;

    Ok(Json(IndexDto {
        logged_in: user.is_some(),
        user,
        login_url: "/login".to_string(),
    }))
}

/// Starts the Discord OAuth flow.
///
/// Stores a CSRF state in the session and redirects to Discord's consent screen with
/// the `identify` and `guilds` scopes.
#[utoipa::path(
    get,
    path = "/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord"),
        (status = 500, description = "Session error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.discord_api,
    );

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes the OAuth flow and logs the user in.
///
/// # Returns
/// - `303 See Other` - Redirect to `/dashboard`
/// - `400 Bad Request` - Missing code or CSRF mismatch
/// - `502 Bad Gateway` - Discord rejected the code
#[utoipa::path(
    get,
    path = "/callback",
    tag = AUTH_TAG,
    params(
        ("code" = Option<String>, Query, description = "OAuth authorization code"),
        ("state" = Option<String>, Query, description = "CSRF state")
    ),
    responses(
        (status = 303, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "No code provided or CSRF mismatch", body = ErrorDto),
        (status = 502, description = "Token exchange failed", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        return Err(AuthError::MissingCode.into());
    };

    validate_csrf(&session, params.state.as_deref()).await?;

    let auth_service = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.discord_api,
    );
    let login = auth_service.callback(code).await?;

    let auth_session = AuthSession::new(&session);
    auth_session.clear().await;
    auth_session
        .login(&login.user.into_dto(), &login.session_id)
        .await?;

    Ok(Redirect::to("/dashboard"))
}

/// Logs out and forgets the stored OAuth tokens.
#[utoipa::path(
    get,
    path = "/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Logged out, redirect to the landing page"),
        (status = 500, description = "Session or database error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);

    if let Some(session_id) = auth_session.session_id().await? {
        DiscordAuthService::new(
            &state.db,
            &state.http_client,
            &state.oauth_client,
            &state.discord_api,
        )
        .logout(&session_id)
        .await?;
    }
    auth_session.clear().await;

    Ok(Redirect::to("/"))
}

async fn validate_csrf(session: &Session, csrf_state: Option<&str>) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match (stored_state, csrf_state) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
