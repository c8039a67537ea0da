//! Ticket factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_ticket(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<entity::ticket::Model, DbErr> {
    entity::ticket::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(next_id().to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        topic: ActiveValue::Set("support".to_string()),
        closed: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
        closed_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
