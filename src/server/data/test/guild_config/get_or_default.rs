use super::*;

/// Tests reading a guild that was never configured.
///
/// Expected: Ok with an empty document and the default prefix
#[tokio::test]
async fn returns_empty_settings_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildConfigRepository::new(db);

    assert!(repo.get(1).await?.is_none());
    let settings = repo.get_or_default(1).await?;
    assert!(settings.values.is_empty());
    assert_eq!(settings.prefix(), "!");

    Ok(())
}

/// Tests reading stored settings.
///
/// Expected: Ok with stored keys readable through the typed accessors
#[tokio::test]
async fn reads_stored_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_guild_config(db, "9", json!({ "prefix": "?", "verified_role_id": "55" })).await?;

    let settings = GuildConfigRepository::new(db).get_or_default(9).await?;

    assert_eq!(settings.prefix(), "?");
    assert_eq!(settings.id(KEY_VERIFIED_ROLE_ID), Some(55));

    Ok(())
}
