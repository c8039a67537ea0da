//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Values are monotonically increasing across all factories so generated
/// snowflakes and names never collide within a test binary.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a giveaway with one entry per provided user id.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Guild the giveaway belongs to
/// - `user_ids` - Users entered into the giveaway
///
/// # Returns
/// - `Ok((giveaway, entries))` - The giveaway and its entries in insertion order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_giveaway_with_entries(
    db: &DatabaseConnection,
    guild_id: &str,
    user_ids: &[&str],
) -> Result<(entity::giveaway::Model, Vec<entity::giveaway_entry::Model>), DbErr> {
    let giveaway = crate::factory::giveaway::GiveawayFactory::new(db)
        .guild_id(guild_id)
        .build()
        .await?;

    let mut entries = Vec::with_capacity(user_ids.len());
    for user_id in user_ids {
        entries.push(crate::factory::giveaway::create_entry(db, giveaway.id, user_id).await?);
    }

    Ok((giveaway, entries))
}
