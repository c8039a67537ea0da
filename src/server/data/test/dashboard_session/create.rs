use super::*;

/// Tests persisting a session after login, then logging out.
///
/// Expected: Ok with the session readable until deleted
#[tokio::test]
async fn creates_and_deletes_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DashboardSessionRepository::new(db);
    let session = repo
        .create(CreateDashboardSessionParam {
            session_id: "abc".to_string(),
            user_id: 12,
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc::now() + Duration::days(7),
        })
        .await?;

    assert_eq!(session.user_id, 12);
    assert_eq!(repo.find("abc").await?, Some(session));

    repo.delete("abc").await?;
    assert!(repo.find("abc").await?.is_none());

    Ok(())
}
