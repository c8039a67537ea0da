use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::server::{bot::handler::Handler, config::BotConfig, error::AppError};

/// Starts the Discord bot and blocks until the gateway connection shuts down.
///
/// # Arguments
/// - `config` - Bot configuration with the token and public links
/// - `db` - Database connection shared by event handlers and schedulers
///
/// # Returns
/// - `Ok(())` - The client shut down cleanly
/// - `Err(AppError::DiscordErr)` - Bot initialization or connection failed
pub async fn start_bot(config: Arc<BotConfig>, db: DatabaseConnection) -> Result<(), AppError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents and must be enabled in
    // the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(db, config.clone());

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
