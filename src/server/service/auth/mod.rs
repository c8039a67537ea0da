//! OAuth2 login with Discord and guild access checks for dashboard users.

use chrono::{DateTime, Duration, Utc};
use oauth2::{basic::BasicTokenType, EmptyExtraTokenFields, StandardTokenResponse, TokenResponse};
use sea_orm::DatabaseConnection;

use crate::server::{
    model::session::{OAuthTokens, DEFAULT_TOKEN_LIFETIME_SECS},
    service::discord_api::DiscordApiClient,
    state::OAuth2Client,
};

pub mod callback;
pub mod guild_access;
pub mod login;
pub mod refresh;

type DiscordTokenResponse = StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>;

pub struct DiscordAuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    pub api: &'a DiscordApiClient,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        api: &'a DiscordApiClient,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            api,
        }
    }
}

/// Extracts the tokens to persist from a token endpoint response.
///
/// Discord normally sends `expires_in`, when it is missing the token is assumed to
/// live for a week.
fn tokens_from_response(token: &DiscordTokenResponse, now: DateTime<Utc>) -> OAuthTokens {
    let lifetime_secs = token
        .expires_in()
        .map(|lifetime| lifetime.as_secs())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

    OAuthTokens {
        access_token: token.access_token().secret().clone(),
        refresh_token: token.refresh_token().map(|token| token.secret().clone()),
        expires_at: now + Duration::seconds(lifetime_secs.min(i64::MAX as u64) as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauth2::{AccessToken, RefreshToken};

    #[test]
    fn missing_expiry_defaults_to_one_week() {
        let now = Utc::now();
        let response = DiscordTokenResponse::new(
            AccessToken::new("access".to_string()),
            BasicTokenType::Bearer,
            EmptyExtraTokenFields {},
        );

        let tokens = tokens_from_response(&response, now);

        assert_eq!(tokens.access_token, "access");
        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.expires_at, now + Duration::seconds(604_800));
    }

    #[test]
    fn uses_expires_in_and_refresh_token() {
        let now = Utc::now();
        let mut response = DiscordTokenResponse::new(
            AccessToken::new("access".to_string()),
            BasicTokenType::Bearer,
            EmptyExtraTokenFields {},
        );
        response.set_expires_in(Some(&std::time::Duration::from_secs(3600)));
        response.set_refresh_token(Some(RefreshToken::new("refresh".to_string())));

        let tokens = tokens_from_response(&response, now);

        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(tokens.expires_at, now + Duration::seconds(3600));
    }
}
