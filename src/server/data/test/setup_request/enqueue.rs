use super::*;

/// Tests enqueueing a request.
///
/// Verifies the stored row is unprocessed and keeps the type tag and payload as given.
///
/// Expected: Ok with stored request
#[tokio::test]
async fn stores_unprocessed_request() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PendingSetupRequest)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SetupRequestRepository::new(db);
    let request = repo
        .enqueue(42, SETUP_CREATE_ROLE, "Helper|10070709|False|True|".to_string())
        .await?;

    assert_eq!(request.guild_id, 42);
    assert_eq!(request.setup_type, SETUP_CREATE_ROLE);
    assert!(!request.processed);

    let stored = entity::prelude::PendingSetupRequest::find_by_id(request.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.guild_id, "42");
    assert_eq!(stored.data, "Helper|10070709|False|True|");

    Ok(())
}
