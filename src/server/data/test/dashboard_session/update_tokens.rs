use super::*;

/// Tests storing refreshed tokens.
///
/// Expected: Ok with the new access token and expiry
#[tokio::test]
async fn replaces_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    DashboardSessionFactory::new(db).session_id("s").build().await?;
    let expires_at = Utc::now() + Duration::days(3);

    let updated = DashboardSessionRepository::new(db)
        .update_tokens(
            "s",
            OAuthTokens {
                access_token: "new-access".to_string(),
                refresh_token: Some("new-refresh".to_string()),
                expires_at,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.access_token, "new-access");
    assert_eq!(updated.refresh_token.as_deref(), Some("new-refresh"));
    assert_eq!(updated.expires_at.timestamp(), expires_at.timestamp());

    Ok(())
}

/// Tests a refresh response without a rotated refresh token.
///
/// Expected: Ok with the previous refresh token kept
#[tokio::test]
async fn keeps_refresh_token_when_not_rotated() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    DashboardSessionFactory::new(db)
        .session_id("s")
        .refresh_token(Some("keep-me".to_string()))
        .build()
        .await?;

    let updated = DashboardSessionRepository::new(db)
        .update_tokens(
            "s",
            OAuthTokens {
                access_token: "new-access".to_string(),
                refresh_token: None,
                expires_at: Utc::now() + Duration::days(7),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.refresh_token.as_deref(), Some("keep-me"));

    Ok(())
}

/// Tests refreshing a session that was logged out.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DashboardSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let updated = DashboardSessionRepository::new(db)
        .update_tokens(
            "gone",
            OAuthTokens {
                access_token: "a".to_string(),
                refresh_token: None,
                expires_at: Utc::now(),
            },
        )
        .await?;

    assert!(updated.is_none());

    Ok(())
}
