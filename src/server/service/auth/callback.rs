use chrono::Utc;
use oauth2::{AuthorizationCode, TokenResponse};
use rand::{distr::Alphanumeric, Rng};

use crate::server::{
    data::dashboard_session::DashboardSessionRepository,
    error::{auth::AuthError, AppError},
    model::session::CreateDashboardSessionParam,
    service::{
        auth::{tokens_from_response, DiscordAuthService},
        discord_api::DiscordUser,
    },
};

/// Length of generated session ids, about 256 bits of entropy.
const SESSION_ID_LEN: usize = 43;

/// The user that just logged in and the id of their persisted OAuth session.
pub struct LoginResult {
    pub user: DiscordUser,
    pub session_id: String,
}

pub fn new_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

impl<'a> DiscordAuthService<'a> {
    /// Completes the OAuth flow.
    ///
    /// Exchanges the authorization code, fetches the Discord user and persists the
    /// tokens in `dashboard_session` under a fresh random session id.
    ///
    /// # Arguments
    /// - `authorization_code` - Code from the callback query string
    ///
    /// # Returns
    /// - `Ok(LoginResult)` - Logged in user and their session id
    /// - `Err(AppError::AuthErr(TokenExchange))` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Fetching the user failed
    /// - `Err(AppError::DbErr)` - Persisting the session failed
    pub async fn callback(&self, authorization_code: String) -> Result<LoginResult, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let user = self.api.current_user(token.access_token().secret()).await?;
        let user_id = user
            .id
            .parse::<u64>()
            .map_err(|e| AppError::InternalError(format!("Invalid Discord user id: {}", e)))?;

        let tokens = tokens_from_response(&token, Utc::now());
        let session_id = new_session_id();

        DashboardSessionRepository::new(self.db)
            .create(CreateDashboardSessionParam {
                session_id: session_id.clone(),
                user_id,
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_at: tokens.expires_at,
            })
            .await?;

        tracing::info!("User {} ({}) logged in to the dashboard", user.username, user.id);

        Ok(LoginResult { user, session_id })
    }

    /// Forgets the persisted tokens for a session.
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        DashboardSessionRepository::new(self.db)
            .delete(session_id)
            .await
    }
}
