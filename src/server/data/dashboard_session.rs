//! Dashboard session repository.
//!
//! The cookie session only carries an opaque session id. Access and refresh tokens live
//! in `dashboard_session` keyed by that id so they survive dashboard restarts.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::server::{
    error::AppError,
    model::session::{CreateDashboardSessionParam, DashboardSession, OAuthTokens},
};

pub struct DashboardSessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardSessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(
        &self,
        session_id: &str,
    ) -> Result<Option<entity::dashboard_session::Model>, AppError> {
        Ok(entity::prelude::DashboardSession::find()
            .filter(entity::dashboard_session::Column::SessionId.eq(session_id))
            .one(self.db)
            .await?)
    }

    /// Stores a session created by a completed OAuth login.
    ///
    /// # Arguments
    /// - `param`: Session id, user and the tokens Discord issued
    ///
    /// # Returns
    /// - `Ok(DashboardSession)`: The stored session
    /// - `Err(AppError)`: Database error
    pub async fn create(
        &self,
        param: CreateDashboardSessionParam,
    ) -> Result<DashboardSession, AppError> {
        let entity = entity::dashboard_session::ActiveModel {
            session_id: ActiveValue::Set(param.session_id),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            access_token: ActiveValue::Set(param.access_token),
            refresh_token: ActiveValue::Set(param.refresh_token),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DashboardSession::from_entity(entity)
    }

    /// Finds a session by id regardless of token expiry.
    ///
    /// # Returns
    /// - `Ok(Some(DashboardSession))`: Session found
    /// - `Ok(None)`: No session with that id
    /// - `Err(AppError)`: Database error
    pub async fn find(&self, session_id: &str) -> Result<Option<DashboardSession>, AppError> {
        self.find_entity(session_id)
            .await?
            .map(DashboardSession::from_entity)
            .transpose()
    }

    /// Finds a session whose access token has not yet expired.
    ///
    /// # Returns
    /// - `Ok(Some(DashboardSession))`: Session exists and `expires_at > now`
    /// - `Ok(None)`: Missing or expired
    pub async fn find_valid(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DashboardSession>, AppError> {
        Ok(self
            .find(session_id)
            .await?
            .filter(|session| !session.is_expired(now)))
    }

    /// Replaces the stored tokens after a refresh.
    ///
    /// A missing refresh token in `tokens` keeps the previously stored one since Discord
    /// does not always rotate it.
    ///
    /// # Returns
    /// - `Ok(Some(DashboardSession))`: Updated session
    /// - `Ok(None)`: No session with that id
    pub async fn update_tokens(
        &self,
        session_id: &str,
        tokens: OAuthTokens,
    ) -> Result<Option<DashboardSession>, AppError> {
        let Some(existing) = self.find_entity(session_id).await? else {
            return Ok(None);
        };

        let mut active: entity::dashboard_session::ActiveModel = existing.into();
        active.access_token = ActiveValue::Set(tokens.access_token);
        if let Some(refresh_token) = tokens.refresh_token {
            active.refresh_token = ActiveValue::Set(Some(refresh_token));
        }
        active.expires_at = ActiveValue::Set(tokens.expires_at);

        let entity = active.update(self.db).await?;

        DashboardSession::from_entity(entity).map(Some)
    }

    /// Deletes a session on logout.
    ///
    /// # Returns
    /// - `Ok(())`: Session deleted, or it did not exist
    /// - `Err(AppError)`: Database error
    pub async fn delete(&self, session_id: &str) -> Result<(), AppError> {
        entity::prelude::DashboardSession::delete_many()
            .filter(entity::dashboard_session::Column::SessionId.eq(session_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
