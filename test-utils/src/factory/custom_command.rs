//! Custom command factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct CustomCommandFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    response: String,
    is_embed: bool,
}

impl<'a> CustomCommandFactory<'a> {
    /// Defaults to a plain text command named `cmd{id}` replying `Hello {user}!`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("cmd{}", id),
            response: "Hello {user}!".to_string(),
            is_embed: false,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    pub fn is_embed(mut self, is_embed: bool) -> Self {
        self.is_embed = is_embed;
        self
    }

    pub async fn build(self) -> Result<entity::custom_command::Model, DbErr> {
        entity::custom_command::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            response: ActiveValue::Set(self.response),
            is_embed: ActiveValue::Set(self.is_embed),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_custom_command(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
) -> Result<entity::custom_command::Model, DbErr> {
    CustomCommandFactory::new(db)
        .guild_id(guild_id)
        .name(name)
        .build()
        .await
}
