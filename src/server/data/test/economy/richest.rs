use super::*;

/// Tests the richest list.
///
/// Expected: Ok with the guild's accounts by balance, limited
#[tokio::test]
async fn orders_by_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_account(db, "1", "10", 5, None).await?;
    create_account(db, "1", "11", 500, None).await?;
    create_account(db, "1", "12", 50, None).await?;
    create_account(db, "2", "13", 5000, None).await?;

    let richest = EconomyRepository::new(db).richest(1, 2).await?;

    let users: Vec<u64> = richest.iter().map(|a| a.user_id).collect();
    assert_eq!(users, vec![11, 12]);

    Ok(())
}
