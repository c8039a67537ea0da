//! Setup, sync, health, help and bulk cleanup commands.

use std::time::Instant;

use serenity::all::{
    Command, CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, InteractionContext, Permissions,
    Role, RoleId,
};

use crate::server::{
    bot::{
        handler::Handler,
        ui::admin::{health_embed, help_embed, setup_buttons, setup_embed, HealthReport},
    },
    error::AppError,
};

use super::{ephemeral, require_guild, require_owner_or_admin};

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("setup")
            .description("Open the dashboard and see the available server templates")
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("sync")
            .description("Re-register the bot's slash commands")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("health")
            .description("Show bot status, latency and uptime")
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("help")
            .description("Show the server structure syntax")
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("delete_channel")
            .description("Delete every channel in this server")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("delete_roles")
            .description("Delete every role the bot is able to manage")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .contexts(vec![InteractionContext::Guild]),
    ]
}

pub async fn setup(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    require_owner_or_admin(ctx, guild_id, command.user.id, permissions).await?;

    let message = CreateInteractionResponseMessage::new()
        .embed(setup_embed(&handler.config.dashboard_url))
        .components(vec![setup_buttons(
            &handler.config.dashboard_url,
            &handler.config.support_server_url,
        )])
        .ephemeral(true);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

pub async fn sync(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    if !permissions.is_some_and(|permissions| permissions.administrator()) {
        return Err(AppError::Forbidden(
            "You need the Administrator permission to sync commands.".to_string(),
        ));
    }

    let registered = Command::set_global_commands(&ctx.http, super::all()).await?;
    tracing::info!(
        "Re-registered {} global commands on request of {}",
        registered.len(),
        command.user.id
    );

    command
        .create_response(
            &ctx.http,
            ephemeral(format!("Synced {} commands.", registered.len())),
        )
        .await?;

    Ok(())
}

pub async fn health(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let started = Instant::now();
    let latency_ms = match ctx.http.get_current_user().await {
        Ok(_) => Some(started.elapsed().as_millis()),
        Err(e) => {
            tracing::warn!("Health check REST call failed: {}", e);
            None
        }
    };

    let guild_ids = ctx.cache.guilds();
    let channels = guild_ids
        .iter()
        .filter_map(|guild_id| ctx.cache.guild(*guild_id).map(|guild| guild.channels.len()))
        .sum();

    let report = HealthReport {
        latency_ms,
        uptime_seconds: handler.started_at.elapsed().as_secs(),
        guilds: guild_ids.len(),
        channels,
    };

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(health_embed(&report)),
            ),
        )
        .await?;

    Ok(())
}

pub async fn help(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(help_embed())
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn delete_channels(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    require_owner_or_admin(ctx, guild_id, command.user.id, permissions).await?;

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true)),
        )
        .await?;

    let channels = guild_id.channels(&ctx.http).await?;
    let mut deleted = 0;
    for channel_id in channels.keys() {
        match channel_id.delete(&ctx.http).await {
            Ok(_) => deleted += 1,
            Err(e) => tracing::warn!(
                "Failed to delete channel {} in guild {}: {}",
                channel_id,
                guild_id,
                e
            ),
        }
    }

    tracing::info!(
        "Deleted {}/{} channels in guild {} for {}",
        deleted,
        channels.len(),
        guild_id,
        command.user.id
    );

    // The invoking channel may be gone, so the edit can fail.
    if let Err(e) = command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Deleted {} channels.", deleted)),
        )
        .await
    {
        tracing::debug!("Could not edit delete_channel response: {}", e);
    }

    Ok(())
}

/// Roles the bot may delete: not `@everyone`, not managed by an integration, and strictly
/// below the bot's highest role.
pub fn deletable_roles<'a>(
    roles: impl IntoIterator<Item = &'a Role>,
    everyone_id: RoleId,
    bot_top_position: u16,
) -> Vec<RoleId> {
    roles
        .into_iter()
        .filter(|role| role.id != everyone_id && !role.managed && role.position < bot_top_position)
        .map(|role| role.id)
        .collect()
}

pub async fn delete_roles(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    require_owner_or_admin(ctx, guild_id, command.user.id, permissions).await?;

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true)),
        )
        .await?;

    let roles = guild_id.roles(&ctx.http).await?;
    let bot_id = ctx.cache.current_user().id;
    let bot_member = guild_id.member(&ctx.http, bot_id).await?;
    let bot_top_position = bot_member
        .roles
        .iter()
        .filter_map(|role_id| roles.get(role_id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0);

    let everyone_id = RoleId::new(guild_id.get());
    let targets = deletable_roles(roles.values(), everyone_id, bot_top_position);

    let mut deleted = 0;
    for role_id in &targets {
        match guild_id.delete_role(&ctx.http, *role_id).await {
            Ok(()) => deleted += 1,
            Err(e) => tracing::warn!(
                "Failed to delete role {} in guild {}: {}",
                role_id,
                guild_id,
                e
            ),
        }
    }

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .content(format!("Deleted {}/{} roles.", deleted, targets.len())),
        )
        .await?;

    Ok(())
}
