//! Guild event handlers.
//!
//! `guild_create` fires for every guild on startup and again when the bot joins a new
//! one. Only real joins (`is_new == Some(true)`) trigger the owner welcome DM.

use serenity::all::{Context, CreateMessage, Guild};

use crate::server::{
    bot::ui::admin::{support_button, welcome_embed},
    config::BotConfig,
};

pub async fn handle_guild_create(
    config: &BotConfig,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count
    );

    if is_new != Some(true) {
        return;
    }

    tracing::info!("Joined guild {} ({})", guild.name, guild.id);

    let message = CreateMessage::new()
        .embed(welcome_embed(&guild.name, &config.dashboard_url))
        .components(vec![support_button(&config.support_server_url)]);

    let dm = match guild.owner_id.create_dm_channel(&ctx.http).await {
        Ok(dm) => dm,
        Err(e) => {
            tracing::warn!(
                "Failed to open DM with owner {} of guild {}: {}",
                guild.owner_id,
                guild.id,
                e
            );
            return;
        }
    };

    if let Err(e) = dm.send_message(&ctx.http, message).await {
        tracing::warn!(
            "Failed to send welcome DM to owner {} of guild {}: {}",
            guild.owner_id,
            guild.id,
            e
        );
    }
}
