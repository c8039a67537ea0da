use super::*;

/// Tests listing a guild's commands.
///
/// Expected: Ok with only that guild's commands sorted by name
#[tokio::test]
async fn lists_guild_commands_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_custom_command(db, "1", "zeta").await?;
    create_custom_command(db, "1", "alpha").await?;
    create_custom_command(db, "2", "beta").await?;

    let commands = CustomCommandRepository::new(db).list(1).await?;

    let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);

    Ok(())
}

/// Tests looking up a command by name.
///
/// Expected: Ok(Some) for the guild that owns it, Ok(None) elsewhere
#[tokio::test]
async fn finds_command_by_name_within_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CustomCommandFactory::new(db)
        .guild_id("1")
        .name("ip")
        .response("play.example.net")
        .build()
        .await?;

    let repo = CustomCommandRepository::new(db);
    let found = repo.find_by_name(1, "ip").await?;

    assert_eq!(found.map(|c| c.response).as_deref(), Some("play.example.net"));
    assert!(repo.find_by_name(2, "ip").await?.is_none());

    Ok(())
}
