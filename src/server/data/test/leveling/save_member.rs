use super::*;

/// Tests saving a member twice.
///
/// Expected: Ok with a single row holding the latest XP
#[tokio::test]
async fn inserts_then_updates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_leveling_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LevelingRepository::new(db);
    let now = Utc::now();
    let member = MemberLevel {
        guild_id: 1,
        user_id: 2,
        xp: 20,
        level: 0,
        last_message_at: now,
    };

    repo.save_member(member.clone()).await?;
    let saved = repo
        .save_member(MemberLevel {
            xp: 120,
            level: 1,
            ..member
        })
        .await?;

    assert_eq!(saved.xp, 120);
    assert_eq!(saved.level, 1);
    assert_eq!(repo.get_member(1, 2).await?.map(|m| m.xp), Some(120));
    assert_eq!(entity::prelude::MemberLevel::find().count(db).await?, 1);

    Ok(())
}
