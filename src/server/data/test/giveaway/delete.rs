use super::*;

/// Tests deleting a giveaway that already has entries.
///
/// Expected: Ok(true) with the giveaway and its entries gone
#[tokio::test]
async fn deletes_giveaway_and_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = GiveawayFactory::new(db).build().await?;
    let repo = GiveawayRepository::new(db);
    repo.toggle_entry(giveaway.id, 7).await?;

    assert!(repo.delete(giveaway.id).await?);
    assert!(repo.find_by_id(giveaway.id).await?.is_none());
    assert!(repo.entrants(giveaway.id).await?.is_empty());

    Ok(())
}

/// Tests deleting an id with no giveaway.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_giveaway() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!GiveawayRepository::new(db).delete(404).await?);

    Ok(())
}
