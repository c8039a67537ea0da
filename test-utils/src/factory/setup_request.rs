//! Pending setup request factory for queue tests.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating pending setup request rows.
///
/// Defaults:
/// - setup_type: `"delete_role"`
/// - data: a unique role id
/// - processed: `false`
/// - created_at: now
pub struct SetupRequestFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    setup_type: String,
    data: String,
    processed: bool,
    created_at: DateTime<Utc>,
}

impl<'a> SetupRequestFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            setup_type: "delete_role".to_string(),
            data: (id + 1000).to_string(),
            processed: false,
            created_at: Utc::now(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn setup_type(mut self, setup_type: impl Into<String>) -> Self {
        self.setup_type = setup_type.into();
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn processed(mut self, processed: bool) -> Self {
        self.processed = processed;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::pending_setup_request::Model, DbErr> {
        entity::pending_setup_request::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            setup_type: ActiveValue::Set(self.setup_type),
            data: ActiveValue::Set(self.data),
            processed: ActiveValue::Set(self.processed),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unprocessed request with default type and payload for the guild.
pub async fn create_setup_request(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::pending_setup_request::Model, DbErr> {
    SetupRequestFactory::new(db).guild_id(guild_id).build().await
}
