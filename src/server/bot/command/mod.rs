//! Slash commands, component clicks and modal submits.
//!
//! Every interaction is routed by name or custom id to a feature module. Handlers return
//! `AppError`; the interaction handler turns `BadRequest`, `Forbidden` and `NotFound`
//! into an ephemeral reply with their message and logs everything else.

pub mod admin;
pub mod economy;
pub mod giveaway;
pub mod leveling;
pub mod moderation;
pub mod rules;
pub mod ticket;
pub mod verify;

use serenity::all::{
    ActionRowComponent, CommandDataOptionValue, CommandInteraction, ComponentInteraction,
    ComponentInteractionDataKind, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, GuildId, ModalInteraction, Permissions, UserId,
};

use crate::server::{bot::handler::Handler, bot::ui, error::AppError};

/// Every global slash command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    let mut commands = Vec::new();
    commands.extend(admin::commands());
    commands.extend(verify::commands());
    commands.extend(rules::commands());
    commands.extend(ticket::commands());
    commands.extend(giveaway::commands());
    commands.extend(leveling::commands());
    commands.extend(economy::commands());
    commands.extend(moderation::commands());
    commands
}

pub async fn run_command(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let db = &handler.db;

    match command.data.name.as_str() {
        "setup" => admin::setup(handler, ctx, command).await,
        "sync" => admin::sync(ctx, command).await,
        "health" => admin::health(handler, ctx, command).await,
        "help" => admin::help(ctx, command).await,
        "delete_channel" => admin::delete_channels(ctx, command).await,
        "delete_roles" => admin::delete_roles(ctx, command).await,
        "verify_setup" => verify::verify_setup(db, ctx, command).await,
        "verify" => verify::verify(db, ctx, command).await,
        "rules" => rules::rules(db, ctx, command).await,
        "rules_setup" => rules::rules_setup(db, ctx, command).await,
        "ticket_panel" => ticket::ticket_panel(ctx, command).await,
        "giveaway_start" => giveaway::giveaway_start(db, ctx, command).await,
        "giveaway_end" => giveaway::giveaway_end(db, ctx, command).await,
        "rank" => leveling::rank(db, ctx, command).await,
        "leaderboard" => leveling::leaderboard(db, ctx, command).await,
        "balance" => economy::balance(db, ctx, command).await,
        "daily" => economy::daily(db, ctx, command).await,
        "pay" => economy::pay(db, ctx, command).await,
        "richest" => economy::richest(db, ctx, command).await,
        "kick" | "ban" | "timeout" | "warn" | "warnings" | "purge" | "slowmode" => {
            moderation::run(db, ctx, command).await
        }
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(())
        }
    }
}

pub async fn run_component(
    handler: &Handler,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let db = &handler.db;

    match component.data.custom_id.as_str() {
        ui::VERIFY_ACCEPT => verify::accept(db, ctx, component).await,
        ui::RULES_SELECT => rules::select(db, ctx, component).await,
        ui::RULES_SETUP_TEXTS
        | ui::RULES_SETUP_BULK
        | ui::RULES_SETUP_BANNER
        | ui::RULES_SETUP_CLEAR_BANNER
        | ui::RULES_SETUP_FOOTER => rules::setup_button(db, ctx, component).await,
        ui::TICKET_SELECT => ticket::open(db, ctx, component).await,
        ui::TICKET_CLOSE => ticket::close(db, ctx, component).await,
        ui::GIVEAWAY_ENTER => giveaway::enter(db, ctx, component).await,
        other => {
            tracing::debug!("Ignoring component interaction {}", other);
            Ok(())
        }
    }
}

pub async fn run_modal(
    handler: &Handler,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let db = &handler.db;

    match modal.data.custom_id.as_str() {
        ui::VERIFY_SETUP_MODAL => verify::submit_setup(db, ctx, modal).await,
        ui::RULES_TEXTS_MODAL
        | ui::RULES_BULK_MODAL
        | ui::RULES_BANNER_MODAL
        | ui::RULES_FOOTER_MODAL => rules::submit(db, ctx, modal).await,
        other => {
            tracing::debug!("Ignoring modal submit {}", other);
            Ok(())
        }
    }
}

/// Text shown to the member when a handler fails.
pub fn user_message(err: &AppError) -> String {
    match err {
        AppError::BadRequest(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
            msg.clone()
        }
        _ => "Something went wrong while handling that. Please try again later.".to_string(),
    }
}

/// Ephemeral text reply.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

pub fn require_guild(guild_id: Option<GuildId>) -> Result<GuildId, AppError> {
    guild_id.ok_or_else(|| AppError::BadRequest("This command only works in a server.".to_string()))
}

fn option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a CommandDataOptionValue> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn str_option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a str> {
    option(command, name)?.as_str()
}

pub fn int_option(command: &CommandInteraction, name: &str) -> Option<i64> {
    option(command, name)?.as_i64()
}

pub fn user_option(command: &CommandInteraction, name: &str) -> Option<UserId> {
    option(command, name)?.as_user_id()
}

/// Value of a modal text input, empty when missing.
pub fn modal_value(modal: &ModalInteraction, custom_id: &str) -> String {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                Some(input.value.clone().unwrap_or_default())
            }
            _ => None,
        })
        .unwrap_or_default()
}

/// First value picked in a string select menu.
pub fn selected_value(component: &ComponentInteraction) -> Option<&str> {
    match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => {
            values.first().map(String::as_str)
        }
        _ => None,
    }
}

/// Allows the guild owner, members with Administrator, and owners or team members of
/// the bot application.
pub async fn require_owner_or_admin(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    permissions: Option<Permissions>,
) -> Result<(), AppError> {
    if permissions.is_some_and(|permissions| permissions.administrator()) {
        return Ok(());
    }

    let guild = guild_id.to_partial_guild(&ctx.http).await?;
    if guild.owner_id == user_id {
        return Ok(());
    }

    let application = ctx.http.get_current_application_info().await?;
    let is_app_owner = application
        .owner
        .as_ref()
        .is_some_and(|owner| owner.id == user_id);
    let is_team_member = application
        .team
        .as_ref()
        .is_some_and(|team| team.members.iter().any(|member| member.user.id == user_id));

    if is_app_owner || is_team_member {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "Only the server owner or an administrator can use this command.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn command_names_are_unique() {
        let commands = all();
        let names: HashSet<String> = commands
            .iter()
            .map(|command| {
                serde_json::to_value(command).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(names.len(), commands.len());
        assert!(names.contains("giveaway_start"));
        assert!(names.contains("delete_roles"));
    }

    #[test]
    fn every_command_is_guild_only() {
        for command in all() {
            let json = serde_json::to_value(&command).unwrap();

            assert_eq!(
                json["contexts"],
                serde_json::json!([0]),
                "/{} is offered outside guilds",
                json["name"]
            );
        }
    }

    #[test]
    fn client_errors_are_shown_to_members() {
        let err = AppError::BadRequest("No rules provided.".to_string());
        assert_eq!(user_message(&err), "No rules provided.");

        let err = AppError::InternalError("db down".to_string());
        assert!(!user_message(&err).contains("db down"));
    }
}
