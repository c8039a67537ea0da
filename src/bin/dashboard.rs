use channel_manager::server::{
    config::Config,
    error::AppError,
    router,
    service::discord_api::DiscordApiClient,
    startup::{
        connect_to_database, connect_to_session, init_tracing, setup_oauth_client,
        setup_reqwest_client,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;

    let db = connect_to_database(&config.database_url).await?;
    let session = connect_to_session(&db).await?;
    let http_client = setup_reqwest_client()?;
    let oauth_client = setup_oauth_client(&config)?;

    if config.bot_token.is_none() {
        tracing::warn!("No bot token configured, bot presence and role lists are unavailable");
    }

    let discord_api = DiscordApiClient::new(
        http_client.clone(),
        config.discord_api_url.clone(),
        config.bot_token.clone(),
    );

    let app = router::router()
        .with_state(AppState::new(
            db,
            http_client,
            oauth_client,
            discord_api,
            config.discord_client_id.clone(),
        ))
        .layer(session);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", address, e)))?;

    tracing::info!("Dashboard listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalError(format!("Dashboard server error: {}", e)))?;

    Ok(())
}
