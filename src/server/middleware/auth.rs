use tower_sessions::Session;

use crate::{
    model::user::DashboardUserDto,
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        service::{auth::DiscordAuthService, discord_api::PartialGuild},
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

/// The dashboard user behind the current request.
pub struct LoggedInUser {
    pub user: DashboardUserDto,
    pub user_id: u64,
    /// Key of the user's persisted OAuth tokens.
    pub session_id: String,
}

pub struct AuthGuard<'a> {
    state: &'a AppState,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(state: &'a AppState, session: &'a Session) -> Self {
        Self { state, session }
    }

    /// Requires a logged in user.
    ///
    /// # Returns
    /// - `Ok(LoggedInUser)` - User and token session id from the cookie session
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Nobody is logged in
    pub async fn require_user(&self) -> Result<LoggedInUser, AppError> {
        let auth_session = AuthSession::new(self.session);

        let Some(user) = auth_session.user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };
        let Some(session_id) = auth_session.session_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };
        let user_id = parse_u64_from_string(user.id.clone())?;

        Ok(LoggedInUser {
            user,
            user_id,
            session_id,
        })
    }

    /// Requires a logged in user who can manage `guild_id`.
    ///
    /// Any failure to confirm access, including an expired OAuth session or a Discord
    /// outage, is reported as a guild access denial so the dashboard shows one message.
    ///
    /// # Returns
    /// - `Ok((LoggedInUser, PartialGuild))` - Access confirmed
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Nobody is logged in
    /// - `Err(AppError::AuthErr(GuildAccessDenied))` - Access could not be confirmed
    pub async fn require_guild_access(
        &self,
        guild_id: u64,
    ) -> Result<(LoggedInUser, PartialGuild), AppError> {
        let user = self.require_user().await?;

        let auth_service = DiscordAuthService::new(
            &self.state.db,
            &self.state.http_client,
            &self.state.oauth_client,
            &self.state.discord_api,
        );

        match auth_service
            .require_guild(user.user_id, &user.session_id, guild_id)
            .await
        {
            Ok(guild) => Ok((user, guild)),
            Err(AppError::DbErr(e)) => Err(AppError::DbErr(e)),
            Err(e) => {
                tracing::debug!(
                    "Guild access check for user {} in guild {} failed: {}",
                    user.user_id,
                    guild_id,
                    e
                );
                Err(AuthError::GuildAccessDenied {
                    user_id: user.user_id,
                    guild_id,
                }
                .into())
            }
        }
    }
}
