use chrono::Utc;
use oauth2::RefreshToken;

use crate::server::{
    data::dashboard_session::DashboardSessionRepository,
    error::AppError,
    model::session::DashboardSession,
    service::auth::{tokens_from_response, DiscordAuthService},
};

impl<'a> DiscordAuthService<'a> {
    /// Trades the session's refresh token for a new access token.
    ///
    /// # Returns
    /// - `Ok(Some(DashboardSession))` - Tokens refreshed and stored
    /// - `Ok(None)` - Unknown session, no refresh token, or Discord refused the refresh
    /// - `Err(AppError)` - Database error
    pub async fn refresh(&self, session_id: &str) -> Result<Option<DashboardSession>, AppError> {
        let repo = DashboardSessionRepository::new(self.db);

        let Some(session) = repo.find(session_id).await? else {
            return Ok(None);
        };
        let Some(refresh_token) = session.refresh_token else {
            tracing::debug!("Session for user {} has no refresh token", session.user_id);
            return Ok(None);
        };

        let token = match self
            .oauth_client
            .exchange_refresh_token(&RefreshToken::new(refresh_token))
            .request_async(self.http_client)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    "Failed to refresh OAuth token for user {}: {}",
                    session.user_id,
                    e
                );
                return Ok(None);
            }
        };

        repo.update_tokens(session_id, tokens_from_response(&token, Utc::now()))
            .await
    }
}
