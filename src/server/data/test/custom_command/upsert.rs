use super::*;

fn param(name: &str, response: &str) -> UpsertCustomCommandParam {
    UpsertCustomCommandParam {
        guild_id: 10,
        name: name.to_string(),
        response: response.to_string(),
        is_embed: false,
        created_by: Some(99),
    }
}

/// Tests creating a new command.
///
/// Expected: Ok with the command stored and its author recorded
#[tokio::test]
async fn creates_command() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let command = CustomCommandRepository::new(db)
        .upsert(param("hello", "Hi {user}"))
        .await?;

    assert_eq!(command.name, "hello");
    assert_eq!(command.guild_id, 10);
    assert_eq!(command.created_by, Some(99));

    Ok(())
}

/// Tests that saving an existing name replaces the response.
///
/// Expected: Ok with one row holding the latest response
#[tokio::test]
async fn replaces_response_for_existing_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CustomCommandRepository::new(db);
    let original = repo.upsert(param("rules", "Read the rules")).await?;
    let updated = repo
        .upsert(UpsertCustomCommandParam {
            is_embed: true,
            created_by: Some(1),
            ..param("rules", "Read #rules")
        })
        .await?;

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.response, "Read #rules");
    assert!(updated.is_embed);
    // Original author kept
    assert_eq!(updated.created_by, Some(99));
    assert_eq!(entity::prelude::CustomCommand::find().count(db).await?, 1);

    Ok(())
}
