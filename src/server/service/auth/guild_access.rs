use chrono::Utc;

use crate::server::{
    data::dashboard_session::DashboardSessionRepository,
    error::{auth::AuthError, AppError},
    service::{auth::DiscordAuthService, discord_api::PartialGuild},
};

impl<'a> DiscordAuthService<'a> {
    /// Lists the logged in user's guilds, refreshing the OAuth token at most once.
    ///
    /// An expired session is refreshed before the first request. A live token that
    /// yields no guilds is treated as revoked and also refreshed once.
    ///
    /// # Returns
    /// - `Ok(Vec<PartialGuild>)` - The user's guilds, possibly empty
    /// - `Err(AppError::AuthErr(UserNotInSession))` - No usable session
    pub async fn user_guilds_with_refresh(
        &self,
        session_id: &str,
    ) -> Result<Vec<PartialGuild>, AppError> {
        let repo = DashboardSessionRepository::new(self.db);
        let now = Utc::now();

        let session = match repo.find_valid(session_id, now).await? {
            Some(session) => session,
            None => self
                .refresh(session_id)
                .await?
                .ok_or(AuthError::UserNotInSession)?,
        };

        let guilds = self.api.user_guilds(&session.access_token).await?;
        if !guilds.is_empty() {
            return Ok(guilds);
        }

        tracing::debug!(
            "Empty guild list for user {}, retrying after token refresh",
            session.user_id
        );
        match self.refresh(session_id).await? {
            Some(refreshed) => self.api.user_guilds(&refreshed.access_token).await,
            None => Ok(guilds),
        }
    }

    /// Confirms the user can manage `guild_id`.
    ///
    /// # Returns
    /// - `Ok(PartialGuild)` - The guild as listed for the user
    /// - `Err(AppError::AuthErr(GuildAccessDenied))` - Not a member, or missing Manage
    ///   Server and Administrator
    pub async fn require_guild(
        &self,
        user_id: u64,
        session_id: &str,
        guild_id: u64,
    ) -> Result<PartialGuild, AppError> {
        let guilds = self.user_guilds_with_refresh(session_id).await?;

        guilds
            .into_iter()
            .find(|guild| guild.id_u64() == Some(guild_id) && guild.can_manage())
            .ok_or_else(|| AuthError::GuildAccessDenied { user_id, guild_id }.into())
    }
}

#[cfg(test)]
mod tests {
    use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, TokenUrl};
    use test_utils::{builder::TestBuilder, factory::dashboard_session::DashboardSessionFactory};

    use crate::server::{service::discord_api::DiscordApiClient, state::OAuth2Client};

    use super::*;

    fn oauth_client(server: &mockito::ServerGuard) -> OAuth2Client {
        BasicClient::new(ClientId::new("client".to_string()))
            .set_client_secret(ClientSecret::new("secret".to_string()))
            .set_auth_uri(AuthUrl::new(format!("{}/authorize", server.url())).unwrap())
            .set_token_uri(TokenUrl::new(format!("{}/token", server.url())).unwrap())
    }

    const MANAGED_GUILD: &str = r#"[{"id":"5","name":"Guild","owner":false,"permissions":"32"}]"#;

    #[tokio::test]
    async fn grants_access_to_managed_guild() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DashboardSession)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        DashboardSessionFactory::new(db)
            .session_id("s")
            .build()
            .await?;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/@me/guilds")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MANAGED_GUILD)
            .create_async()
            .await;

        let http = reqwest::Client::new();
        let oauth = oauth_client(&server);
        let api = DiscordApiClient::new(http.clone(), server.url(), None);
        let service = DiscordAuthService::new(db, &http, &oauth, &api);

        let guild = service.require_guild(1, "s", 5).await?;
        assert_eq!(guild.name, "Guild");

        let denied = service.require_guild(1, "s", 6).await;
        assert!(matches!(
            denied,
            Err(AppError::AuthErr(AuthError::GuildAccessDenied { guild_id: 6, .. }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn refreshes_once_on_empty_guild_list() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DashboardSession)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let stored = DashboardSessionFactory::new(db)
            .session_id("s")
            .build()
            .await?;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/@me/guilds")
            .match_header("authorization", format!("Bearer {}", stored.access_token).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;
        let token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"fresh","token_type":"bearer","expires_in":3600,"refresh_token":"rotated"}"#,
            )
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", "/users/@me/guilds")
            .match_header("authorization", "Bearer fresh")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MANAGED_GUILD)
            .create_async()
            .await;

        let http = reqwest::Client::new();
        let oauth = oauth_client(&server);
        let api = DiscordApiClient::new(http.clone(), server.url(), None);
        let service = DiscordAuthService::new(db, &http, &oauth, &api);

        let guilds = service.user_guilds_with_refresh("s").await?;

        token_mock.assert_async().await;
        assert_eq!(guilds.len(), 1);
        let session = DashboardSessionRepository::new(db).find("s").await?.unwrap();
        assert_eq!(session.access_token, "fresh");
        assert_eq!(session.refresh_token.as_deref(), Some("rotated"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_session_is_not_logged_in() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::DashboardSession)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let server = mockito::Server::new_async().await;
        let http = reqwest::Client::new();
        let oauth = oauth_client(&server);
        let api = DiscordApiClient::new(http.clone(), server.url(), None);
        let service = DiscordAuthService::new(db, &http, &oauth, &api);

        let result = service.user_guilds_with_refresh("nope").await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::UserNotInSession))
        ));

        Ok(())
    }
}
