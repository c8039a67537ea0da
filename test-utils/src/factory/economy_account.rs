//! Economy account factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_account(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    balance: i64,
    last_daily_at: Option<DateTime<Utc>>,
) -> Result<entity::economy_account::Model, DbErr> {
    entity::economy_account::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        balance: ActiveValue::Set(balance),
        last_daily_at: ActiveValue::Set(last_daily_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
