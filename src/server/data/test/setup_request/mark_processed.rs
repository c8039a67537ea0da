use super::*;

/// Tests marking a request processed.
///
/// Expected: Ok and the row no longer appears in the unprocessed list
#[tokio::test]
async fn flips_processed_flag() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let request = SetupRequestFactory::new(db).build().await?;

    let repo = SetupRequestRepository::new(db);
    repo.mark_processed(request.id).await?;

    let stored = entity::prelude::PendingSetupRequest::find_by_id(request.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.processed);
    assert!(repo.get_unprocessed().await?.is_empty());

    Ok(())
}

/// Tests marking a request that does not exist.
///
/// Expected: Ok with no effect
#[tokio::test]
async fn ignores_missing_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = SetupRequestRepository::new(db).mark_processed(999).await;

    assert!(result.is_ok());

    Ok(())
}
