use super::*;

/// Tests the first write for a guild.
///
/// Expected: Ok with a new row holding the patched key
#[tokio::test]
async fn creates_row_on_first_write() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = GuildConfigRepository::new(db)
        .set_key(3, KEY_PREFIX, json!("$"))
        .await?;

    assert_eq!(settings.prefix(), "$");
    assert_eq!(entity::prelude::GuildConfig::find().count(db).await?, 1);

    Ok(())
}

/// Tests that merging keeps keys it does not mention.
///
/// Expected: Ok with old and new keys present in a single row
#[tokio::test]
async fn keeps_unrelated_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_guild_config(db, "4", json!({ "prefix": "?" })).await?;

    let repo = GuildConfigRepository::new(db);
    let settings = repo
        .merge(4, patch(KEY_VERIFIED_ROLE_ID, json!("77")))
        .await?;

    assert_eq!(settings.prefix(), "?");
    assert_eq!(settings.id(KEY_VERIFIED_ROLE_ID), Some(77));

    let reloaded = repo.get_or_default(4).await?;
    assert_eq!(reloaded, settings);
    assert_eq!(entity::prelude::GuildConfig::find().count(db).await?, 1);

    Ok(())
}
