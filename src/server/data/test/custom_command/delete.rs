use super::*;

/// Tests deleting an existing command.
///
/// Expected: Ok(true), then Ok(false) on a second delete
#[tokio::test]
async fn deletes_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_custom_command(db, "1", "bye").await?;

    let repo = CustomCommandRepository::new(db);

    assert!(repo.delete(1, "bye").await?);
    assert!(!repo.delete(1, "bye").await?);

    Ok(())
}
