//! Dashboard OAuth session factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for persisted dashboard sessions.
///
/// Defaults to a session that expires one week from now with a refresh token.
pub struct DashboardSessionFactory<'a> {
    db: &'a DatabaseConnection,
    session_id: String,
    user_id: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_at: DateTime<Utc>,
}

impl<'a> DashboardSessionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            session_id: format!("session-{}", id),
            user_id: id.to_string(),
            access_token: format!("access-{}", id),
            refresh_token: Some(format!("refresh-{}", id)),
            expires_at: Utc::now() + Duration::days(7),
        }
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn refresh_token(mut self, refresh_token: Option<String>) -> Self {
        self.refresh_token = refresh_token;
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub async fn build(self) -> Result<entity::dashboard_session::Model, DbErr> {
        entity::dashboard_session::ActiveModel {
            session_id: ActiveValue::Set(self.session_id),
            user_id: ActiveValue::Set(self.user_id),
            access_token: ActiveValue::Set(self.access_token),
            refresh_token: ActiveValue::Set(self.refresh_token),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_dashboard_session(
    db: &DatabaseConnection,
) -> Result<entity::dashboard_session::Model, DbErr> {
    DashboardSessionFactory::new(db).build().await
}
