use sea_orm::DatabaseConnection;
use serenity::all::{ActivityData, Command, Context, GuildId, Ready};

use crate::server::{bot::command, scheduler};

/// Handle the ready event: registers global slash commands and sets the bot's activity.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord and sees {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    match Command::set_global_commands(&ctx.http, command::all()).await {
        Ok(commands) => tracing::info!("Registered {} global commands", commands.len()),
        Err(e) => tracing::error!("Failed to register global commands: {}", e),
    }

    ctx.set_activity(Some(ActivityData::watching("over your server | /help")));
}

/// Starts the background jobs once the guild cache is populated, so the setup queue
/// can check guild membership against it.
pub async fn handle_cache_ready(db: &DatabaseConnection, ctx: Context, guilds: Vec<GuildId>) {
    tracing::info!("Cache ready with {} guilds, starting schedulers", guilds.len());

    if let Err(e) =
        scheduler::setup_queue::start_scheduler(db.clone(), ctx.http.clone(), ctx.cache.clone())
            .await
    {
        tracing::error!("Failed to start setup queue scheduler: {}", e);
    }

    if let Err(e) = scheduler::giveaway::start_scheduler(db.clone(), ctx.http.clone()).await {
        tracing::error!("Failed to start giveaway scheduler: {}", e);
    }
}
