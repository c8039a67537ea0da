use super::*;

/// Tests listing requests for one guild.
///
/// Verifies other guilds are excluded and the newest request comes first, including
/// processed ones.
///
/// Expected: Ok with the guild's requests newest first
#[tokio::test]
async fn lists_guild_requests_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = SetupRequestFactory::new(db)
        .guild_id("7")
        .processed(true)
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;
    let newer = SetupRequestFactory::new(db)
        .guild_id("7")
        .created_at(now)
        .build()
        .await?;
    SetupRequestFactory::new(db).guild_id("8").build().await?;

    let requests = SetupRequestRepository::new(db).list_for_guild(7).await?;

    let ids: Vec<i32> = requests.iter().map(|request| request.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}
