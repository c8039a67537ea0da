use super::*;

/// Tests entering and leaving with the same button.
///
/// Expected: Entered, then Left, with entrants following along
#[tokio::test]
async fn toggles_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = GiveawayFactory::new(db).build().await?;
    let repo = GiveawayRepository::new(db);

    assert_eq!(repo.toggle_entry(giveaway.id, 8).await?, EntryToggle::Entered);
    assert_eq!(repo.entrants(giveaway.id).await?, vec![8]);

    assert_eq!(repo.toggle_entry(giveaway.id, 8).await?, EntryToggle::Left);
    assert_eq!(repo.entry_count(giveaway.id).await?, 0);

    Ok(())
}

/// Tests that entrants are scoped to their giveaway.
///
/// Expected: Ok with only the giveaway's own entrants in entry order
#[tokio::test]
async fn entrants_are_per_giveaway() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = create_giveaway_with_entries(db, "1", &["10", "11"]).await?;
    create_giveaway_with_entries(db, "1", &["12"]).await?;

    let entrants = GiveawayRepository::new(db).entrants(first.id).await?;

    assert_eq!(entrants, vec![10, 11]);

    Ok(())
}
