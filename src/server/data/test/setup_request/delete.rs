use super::*;

/// Tests deleting a request from its own guild.
///
/// Expected: Ok(true) and the row is gone
#[tokio::test]
async fn deletes_request_in_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let request = SetupRequestFactory::new(db).guild_id("5").build().await?;

    let deleted = SetupRequestRepository::new(db).delete(5, request.id).await?;

    assert!(deleted);
    assert!(entity::prelude::PendingSetupRequest::find_by_id(request.id)
        .one(db)
        .await?
        .is_none());

    Ok(())
}

/// Tests that a request cannot be deleted through another guild.
///
/// Expected: Ok(false) and the row is kept
#[tokio::test]
async fn refuses_request_from_other_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let request = SetupRequestFactory::new(db).guild_id("5").build().await?;

    let deleted = SetupRequestRepository::new(db).delete(6, request.id).await?;

    assert!(!deleted);
    assert!(entity::prelude::PendingSetupRequest::find_by_id(request.id)
        .one(db)
        .await?
        .is_some());

    Ok(())
}
