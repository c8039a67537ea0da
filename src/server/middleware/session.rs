//! Type-safe session wrappers.
//!
//! The dashboard keeps two kinds of state in the tower-sessions cookie session:
//! - `AuthSession` - The logged in Discord user and the id of their persisted OAuth tokens
//! - `CsrfSession` - The OAuth `state` value between `/login` and `/callback`
//!
//! The OAuth tokens themselves never enter the cookie session; they live in the
//! `dashboard_session` table keyed by the id stored here.

use tower_sessions::Session;

use crate::{model::user::DashboardUserDto, server::error::AppError};

const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_SESSION_ID: &str = "auth:session_id";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the logged in user and their token session id.
    ///
    /// # Arguments
    /// - `user` - Discord user shown by the dashboard
    /// - `session_id` - Key of the user's `dashboard_session` row
    ///
    /// # Returns
    /// - `Ok(())` - Stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn login(&self, user: &DashboardUserDto, session_id: &str) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER, user).await?;
        self.session
            .insert(SESSION_AUTH_SESSION_ID, session_id.to_string())
            .await?;
        Ok(())
    }

    /// Gets the logged in user, `None` when nobody is logged in.
    pub async fn user(&self) -> Result<Option<DashboardUserDto>, AppError> {
        Ok(self.session.get::<DashboardUserDto>(SESSION_AUTH_USER).await?)
    }

    /// Gets the id of the persisted OAuth tokens for this browser session.
    pub async fn session_id(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.get::<String>(SESSION_AUTH_SESSION_ID).await?)
    }

    /// Clears all data from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF state for the OAuth round trip.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token so each token is usable once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token found and removed
    /// - `Ok(None)` - No token stored
    /// - `Err(AppError::SessionErr(_))` - Failed to access the session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use super::*;

    #[tokio::test]
    async fn login_stores_user_and_session_id() -> Result<(), AppError> {
        let mut test = TestBuilder::new().build().await.unwrap();
        let session = test.session().await.unwrap();
        let auth = AuthSession::new(session);
        let user = DashboardUserDto {
            id: "1".to_string(),
            username: "mod".to_string(),
            avatar: None,
        };

        auth.login(&user, "abc").await?;

        assert_eq!(auth.user().await?, Some(user));
        assert_eq!(auth.session_id().await?.as_deref(), Some("abc"));

        auth.clear().await;
        assert_eq!(auth.user().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn csrf_token_is_single_use() -> Result<(), AppError> {
        let mut test = TestBuilder::new().build().await.unwrap();
        let session = test.session().await.unwrap();
        let csrf = CsrfSession::new(session);

        csrf.set_token("state".to_string()).await?;

        assert_eq!(csrf.take_token().await?.as_deref(), Some("state"));
        assert_eq!(csrf.take_token().await?, None);

        Ok(())
    }
}
