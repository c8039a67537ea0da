use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, InteractionContext, ModalInteraction,
    Permissions,
};

use crate::server::{
    bot::ui::verify::{verify_button, verify_embed, verify_form, verify_setup_modal},
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::guild_config::KEY_VERIFY,
};

use super::{ephemeral, modal_value, require_guild};

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("verify_setup")
            .description("Configure the verification panel")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("verify")
            .description("Post the verification panel in this channel")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .contexts(vec![InteractionContext::Guild]),
    ]
}

pub async fn verify_setup(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let config = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?
        .verify();

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Modal(verify_setup_modal(&config)),
        )
        .await?;

    Ok(())
}

pub async fn submit_setup(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(modal.guild_id)?;
    let repo = GuildConfigRepository::new(db);

    let mut config = repo.get_or_default(guild_id.get()).await?.verify();
    config.apply_form(verify_form(|id| modal_value(modal, id)));

    if config.verified_role_id().is_none() {
        return Err(AppError::BadRequest(
            "The verified role ID must be a valid role ID.".to_string(),
        ));
    }

    repo.set_key(guild_id.get(), KEY_VERIFY, serde_json::to_value(&config)?)
        .await?;

    tracing::info!("Updated verification settings for guild {}", guild_id);

    modal
        .create_response(
            &ctx.http,
            ephemeral("Verification settings saved. Use /verify to post the panel."),
        )
        .await?;

    Ok(())
}

pub async fn verify(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let config = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?
        .verify();

    if config.verified_role_id().is_none() {
        return Err(AppError::BadRequest(
            "Verification is not configured yet. Run /verify_setup first.".to_string(),
        ));
    }

    command
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(verify_embed(&config))
                .components(vec![verify_button()]),
        )
        .await?;

    command
        .create_response(&ctx.http, ephemeral("Verification panel posted."))
        .await?;

    Ok(())
}

/// Grants the verified role and removes the unverified one.
pub async fn accept(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let config = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?
        .verify();

    let Some(verified) = config.verified_role_id() else {
        return Err(AppError::BadRequest(
            "Verification is not configured on this server.".to_string(),
        ));
    };

    let user_id = component.user.id;
    let already_verified = component
        .member
        .as_ref()
        .is_some_and(|member| member.roles.contains(&verified));

    if !already_verified {
        ctx.http
            .add_member_role(guild_id, user_id, verified, Some("Member verified"))
            .await?;
    }
    if let Some(unverified) = config.unverified_role_id() {
        if let Err(e) = ctx
            .http
            .remove_member_role(guild_id, user_id, unverified, Some("Member verified"))
            .await
        {
            tracing::warn!(
                "Failed to remove unverified role from {} in guild {}: {}",
                user_id,
                guild_id,
                e
            );
        }
    }

    let reply = if already_verified {
        "You are already verified."
    } else {
        "✅ You are verified. Welcome!"
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(reply)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}
