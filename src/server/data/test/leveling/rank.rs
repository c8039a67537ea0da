use super::*;

/// Tests leaderboard order and rank position.
///
/// Expected: Ok with members ordered by XP and ranks counted from 1
#[tokio::test]
async fn orders_members_by_xp() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_leveling_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (user_id, xp) in [("1", 50), ("2", 500), ("3", 150)] {
        MemberLevelFactory::new(db)
            .guild_id("9")
            .user_id(user_id)
            .xp(xp)
            .build()
            .await?;
    }
    MemberLevelFactory::new(db).xp(10_000).build().await?;

    let repo = LevelingRepository::new(db);
    let top = repo.top(9, 2).await?;

    let users: Vec<u64> = top.iter().map(|m| m.user_id).collect();
    assert_eq!(users, vec![2, 3]);
    assert_eq!(repo.rank(9, 500).await?, 1);
    assert_eq!(repo.rank(9, 50).await?, 3);

    Ok(())
}
