use super::*;

/// Tests selecting giveaways whose end time has passed.
///
/// Expected: Ok with only past-due running giveaways
#[tokio::test]
async fn returns_only_past_due_running() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let past = GiveawayFactory::new(db)
        .ends_at(now - Duration::minutes(1))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .ends_at(now + Duration::minutes(30))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .ends_at(now - Duration::minutes(5))
        .ended(true)
        .build()
        .await?;

    let due = GiveawayRepository::new(db).due(now).await?;

    let ids: Vec<i32> = due.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![past.id]);

    Ok(())
}
