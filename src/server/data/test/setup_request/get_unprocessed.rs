use super::*;

/// Tests that processed rows are skipped.
///
/// Expected: Ok with only the unprocessed rows, oldest first
#[tokio::test]
async fn returns_only_unprocessed_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = SetupRequestFactory::new(db).build().await?;
    SetupRequestFactory::new(db).processed(true).build().await?;
    let third = SetupRequestFactory::new(db).build().await?;

    let repo = SetupRequestRepository::new(db);
    let pending = repo.get_unprocessed().await?;

    let ids: Vec<i32> = pending.iter().map(|request| request.id).collect();
    assert_eq!(ids, vec![first.id, third.id]);

    Ok(())
}

/// Tests an empty queue.
///
/// Expected: Ok with empty Vec
#[tokio::test]
async fn returns_empty_when_queue_is_empty() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let pending = SetupRequestRepository::new(db).get_unprocessed().await?;

    assert!(pending.is_empty());

    Ok(())
}

/// Tests a row whose guild id is not numeric.
///
/// Expected: Ok with the row returned as stored next to valid rows
#[tokio::test]
async fn returns_rows_with_unreadable_guild_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bad = SetupRequestFactory::new(db).guild_id("abc").build().await?;
    let good = SetupRequestFactory::new(db).guild_id("42").build().await?;

    let pending = SetupRequestRepository::new(db).get_unprocessed().await?;

    let ids: Vec<i32> = pending.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![bad.id, good.id]);
    assert_eq!(pending[0].guild_id, "abc");

    Ok(())
}
