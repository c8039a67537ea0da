use super::*;

/// Tests the first daily claim for a new member.
///
/// Expected: Ok(Claimed) with the reward as balance
#[tokio::test]
async fn first_claim_pays_reward() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let outcome = EconomyRepository::new(db)
        .claim_daily(1, 2, Utc::now())
        .await?;

    assert_eq!(
        outcome,
        DailyOutcome::Claimed {
            balance: DAILY_REWARD
        }
    );

    Ok(())
}

/// Tests claiming again inside the cooldown.
///
/// Expected: Ok(Cooldown) with the balance unchanged
#[tokio::test]
async fn second_claim_hits_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    create_account(db, "1", "2", 50, Some(now - Duration::hours(2))).await?;

    let repo = EconomyRepository::new(db);
    let outcome = repo.claim_daily(1, 2, now).await?;

    assert!(matches!(outcome, DailyOutcome::Cooldown { .. }));
    assert_eq!(repo.get_or_create(1, 2).await?.balance, 50);

    Ok(())
}

/// Tests two claims racing for the same member.
///
/// Expected: exactly one Claimed, the other Cooldown, and the reward paid once
#[tokio::test]
async fn concurrent_claims_pay_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_account(db, "1", "2", 50, None).await?;

    let now = Utc::now();
    let first = EconomyRepository::new(db);
    let second = EconomyRepository::new(db);

    let (a, b) = tokio::join!(first.claim_daily(1, 2, now), second.claim_daily(1, 2, now));
    let outcomes = [a?, b?];

    let claimed = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, DailyOutcome::Claimed { .. }))
        .count();
    assert_eq!(claimed, 1);
    assert_eq!(first.get_or_create(1, 2).await?.balance, 50 + DAILY_REWARD);

    Ok(())
}

/// Tests a claim once the previous one is older than the cooldown.
///
/// Expected: Ok(Claimed) with the reward added to the existing balance
#[tokio::test]
async fn claim_after_cooldown_pays_again() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::EconomyAccount)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    create_account(db, "1", "2", 50, Some(now - Duration::hours(25))).await?;

    let repo = EconomyRepository::new(db);
    let outcome = repo.claim_daily(1, 2, now).await?;

    assert_eq!(
        outcome,
        DailyOutcome::Claimed {
            balance: 50 + DAILY_REWARD
        }
    );
    assert!(matches!(
        repo.claim_daily(1, 2, now).await?,
        DailyOutcome::Cooldown { .. }
    ));

    Ok(())
}
