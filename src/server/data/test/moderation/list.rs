use super::*;

fn warning(user_id: u64, reason: &str) -> CreateWarningParam {
    CreateWarningParam {
        guild_id: 1,
        user_id,
        moderator_id: 99,
        reason: reason.to_string(),
    }
}

/// Tests listing a member's warnings.
///
/// Expected: Ok with that member's warnings, newest first
#[tokio::test]
async fn lists_member_warnings_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationWarning)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationRepository::new(db);
    repo.add_warning(warning(5, "spam")).await?;
    repo.add_warning(warning(5, "caps")).await?;
    repo.add_warning(warning(6, "other member")).await?;

    let warnings = repo.list(1, 5).await?;

    let reasons: Vec<&str> = warnings.iter().map(|w| w.reason.as_str()).collect();
    assert_eq!(reasons, vec!["caps", "spam"]);
    assert!(warnings.iter().all(|w| w.moderator_id == 99));

    Ok(())
}
