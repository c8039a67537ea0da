use super::*;

/// Tests creating a giveaway and attaching its message.
///
/// Expected: Ok with the giveaway found by message id afterwards
#[tokio::test]
async fn creates_and_links_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GiveawayRepository::new(db);
    let giveaway = repo
        .create(CreateGiveawayParam {
            guild_id: 1,
            channel_id: 2,
            prize: "Nitro".to_string(),
            description: None,
            winner_count: 0,
            host_id: 3,
            ends_at: Utc::now() + Duration::minutes(10),
        })
        .await?;

    assert_eq!(giveaway.message_id, None);
    // At least one winner is always drawn
    assert_eq!(giveaway.winner_count, 1);

    repo.set_message_id(giveaway.id, 500).await?;
    let found = repo.find_by_message(500).await?.unwrap();

    assert_eq!(found.id, giveaway.id);
    assert_eq!(found.prize, "Nitro");

    Ok(())
}

/// Tests finding the newest running giveaway in a channel.
///
/// Expected: Ok with the newest unended giveaway
#[tokio::test]
async fn latest_active_skips_ended() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_giveaway_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let running = GiveawayFactory::new(db).channel_id("77").build().await?;
    GiveawayFactory::new(db)
        .channel_id("77")
        .ended(true)
        .build()
        .await?;

    let found = GiveawayRepository::new(db)
        .latest_active_in_channel(77)
        .await?;

    assert_eq!(found.map(|g| g.id), Some(running.id));

    Ok(())
}
