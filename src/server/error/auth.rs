use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Message shown whenever guild access cannot be confirmed.
pub const GUILD_ACCESS_DENIED: &str = "Unauthorized or session expired. Ensure you're signed in and have Manage Server or Administrator permissions.";

#[derive(Error, Debug)]
pub enum AuthError {
    /// The CSRF state in the OAuth callback does not match the one stored in the session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// The OAuth callback was requested without an authorization code.
    #[error("No code provided")]
    MissingCode,

    /// No logged in user in the session, or the persisted OAuth session expired.
    #[error("User not logged in")]
    UserNotInSession,

    /// Discord rejected the authorization code or refresh token.
    #[error("Failed to exchange OAuth2 token: {0}")]
    TokenExchange(String),

    /// The user lacks Manage Server or Administrator in the requested guild.
    #[error("User {user_id} lacks management access to guild {guild_id}")]
    GuildAccessDenied { user_id: u64, guild_id: u64 },
}

/// Maps authentication errors to status codes.
///
/// - `CsrfValidationFailed` / `MissingCode` → 400 Bad Request
/// - `UserNotInSession` → 401 Unauthorized
/// - `GuildAccessDenied` → 403 Forbidden with the guild access message
/// - `TokenExchange` → 502 Bad Gateway
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.".to_string(),
            ),
            Self::MissingCode => (StatusCode::BAD_REQUEST, "No code provided".to_string()),
            Self::UserNotInSession => (StatusCode::UNAUTHORIZED, "Not logged in".to_string()),
            Self::GuildAccessDenied { .. } => {
                (StatusCode::FORBIDDEN, GUILD_ACCESS_DENIED.to_string())
            }
            Self::TokenExchange(_) => (
                StatusCode::BAD_GATEWAY,
                "Discord rejected the login, please try again.".to_string(),
            ),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
