use super::*;

/// Tests that an expired session is not returned as valid.
///
/// Expected: Ok(None) from find_valid while find still returns the row
#[tokio::test]
async fn skips_expired_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    DashboardSessionFactory::new(db)
        .session_id("old")
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let repo = DashboardSessionRepository::new(db);

    assert!(repo.find_valid("old", Utc::now()).await?.is_none());
    assert!(repo.find("old").await?.is_some());

    Ok(())
}

/// Tests a live session.
///
/// Expected: Ok(Some) with the stored user
#[tokio::test]
async fn returns_live_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    DashboardSessionFactory::new(db)
        .session_id("live")
        .user_id("33")
        .build()
        .await?;

    let session = DashboardSessionRepository::new(db)
        .find_valid("live", Utc::now())
        .await?;

    assert_eq!(session.map(|s| s.user_id), Some(33));

    Ok(())
}
