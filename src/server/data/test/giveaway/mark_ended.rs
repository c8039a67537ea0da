use super::*;

/// Tests that only the first finisher wins the race.
///
/// Expected: Ok(true) the first time, Ok(false) afterwards
#[tokio::test]
async fn ends_only_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = GiveawayFactory::new(db).build().await?;
    let repo = GiveawayRepository::new(db);

    assert!(repo.mark_ended(giveaway.id).await?);
    assert!(!repo.mark_ended(giveaway.id).await?);
    assert!(repo.find_by_id(giveaway.id).await?.unwrap().ended);

    Ok(())
}
