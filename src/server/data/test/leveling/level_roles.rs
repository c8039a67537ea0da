use super::*;

/// Tests replacing the role assigned to a level.
///
/// Expected: Ok with one row per level holding the newest role
#[tokio::test]
async fn set_level_role_replaces_existing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_leveling_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LevelingRepository::new(db);
    repo.set_level_role(1, 5, 100).await?;
    repo.set_level_role(1, 5, 200).await?;

    let roles = repo.level_roles(1).await?;

    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id, 200);

    Ok(())
}

/// Tests picking the roles earned by a level up.
///
/// Expected: Ok with roles whose level is above the old level and at most the new one
#[tokio::test]
async fn level_roles_between_is_half_open() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_leveling_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (level, role_id) in [(5, "105"), (10, "110"), (20, "120")] {
        create_level_role(db, "1", level, role_id).await?;
    }
    create_level_role(db, "2", 10, "210").await?;

    let roles = LevelingRepository::new(db)
        .level_roles_between(1, 5, 10)
        .await?;

    let ids: Vec<u64> = roles.iter().map(|r| r.role_id).collect();
    assert_eq!(ids, vec![110]);

    Ok(())
}
