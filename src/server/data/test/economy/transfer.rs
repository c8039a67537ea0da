use super::*;

/// Tests a successful transfer.
///
/// Expected: Ok(Sent) with both balances moved
#[tokio::test]
async fn moves_coins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_account(db, "1", "10", 300, None).await?;

    let repo = EconomyRepository::new(db);
    let outcome = repo.transfer(1, 10, 20, 120).await?;

    assert_eq!(
        outcome,
        TransferOutcome::Sent {
            sender_balance: 180
        }
    );
    assert_eq!(repo.get_or_create(1, 20).await?.balance, 120);

    Ok(())
}

/// Tests sending more than the sender has.
///
/// Expected: Ok(InsufficientFunds) and no balance changes
#[tokio::test]
async fn rejects_overdraft() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_account(db, "1", "10", 30, None).await?;

    let repo = EconomyRepository::new(db);
    let outcome = repo.transfer(1, 10, 20, 31).await?;

    assert_eq!(outcome, TransferOutcome::InsufficientFunds { balance: 30 });
    assert_eq!(repo.get_or_create(1, 10).await?.balance, 30);
    assert_eq!(repo.get_or_create(1, 20).await?.balance, 0);

    Ok(())
}

/// Tests invalid transfer requests.
///
/// Expected: InvalidAmount for non-positive amounts, SelfTransfer for same user
#[tokio::test]
async fn rejects_invalid_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EconomyRepository::new(db);

    assert_eq!(repo.transfer(1, 10, 20, 0).await?, TransferOutcome::InvalidAmount);
    assert_eq!(repo.transfer(1, 10, 10, 5).await?, TransferOutcome::SelfTransfer);

    Ok(())
}
