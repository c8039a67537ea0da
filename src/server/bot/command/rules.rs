//! Rules panel command, its category select and the owner setup panel.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, InteractionContext, ModalInteraction,
};

use crate::server::{
    bot::ui::{
        self,
        rules::{
            banner_modal, bulk_modal, footer_modal, rules_detail, rules_embed, rules_select,
            rules_setup_buttons, rules_setup_embed, texts_modal, BULK_INPUTS, BULK_INPUT_PREFIX,
            INPUT_BANNER, INPUT_BODY, INPUT_DESCRIPTION, INPUT_FOOTER, INPUT_TITLE, INPUT_WELCOME,
        },
    },
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::{
        guild_config::KEY_RULES,
        rules::{is_valid_banner_url, parse_bulk_rules, RulesConfig},
    },
};

use super::{ephemeral, modal_value, require_guild, require_owner_or_admin, selected_value};

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("rules")
            .description("Post the server rules in this channel")
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("rules_setup")
            .description("Edit the server rules")
            .contexts(vec![InteractionContext::Guild]),
    ]
}

async fn load(db: &DatabaseConnection, guild_id: u64) -> Result<RulesConfig, AppError> {
    Ok(GuildConfigRepository::new(db)
        .get_or_default(guild_id)
        .await?
        .rules())
}

async fn save(
    db: &DatabaseConnection,
    guild_id: u64,
    config: RulesConfig,
) -> Result<RulesConfig, AppError> {
    let config = config.sanitized();
    GuildConfigRepository::new(db)
        .set_key(guild_id, KEY_RULES, serde_json::to_value(&config)?)
        .await?;

    Ok(config)
}

pub async fn rules(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let config = load(db, guild_id.get()).await?;

    command
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(rules_embed(&config))
                .components(vec![rules_select(&config)]),
        )
        .await?;

    command
        .create_response(&ctx.http, ephemeral("Rules posted."))
        .await?;

    Ok(())
}

/// Shows the chosen category to the member only.
pub async fn select(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let config = load(db, guild_id.get()).await?;

    let index = selected_value(component).and_then(|value| value.parse::<usize>().ok());

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(rules_detail(&config, index))
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn rules_setup(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let permissions = command.member.as_ref().and_then(|member| member.permissions);
    require_owner_or_admin(ctx, guild_id, command.user.id, permissions).await?;

    let config = load(db, guild_id.get()).await?;

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(rules_setup_embed(&config))
                    .components(vec![rules_setup_buttons()])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn setup_button(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let permissions = component.member.as_ref().and_then(|member| member.permissions);
    require_owner_or_admin(ctx, guild_id, component.user.id, permissions).await?;

    let config = load(db, guild_id.get()).await?;

    let response = match component.data.custom_id.as_str() {
        ui::RULES_SETUP_TEXTS => CreateInteractionResponse::Modal(texts_modal(&config)),
        ui::RULES_SETUP_BULK => CreateInteractionResponse::Modal(bulk_modal()),
        ui::RULES_SETUP_BANNER => CreateInteractionResponse::Modal(banner_modal()),
        ui::RULES_SETUP_FOOTER => CreateInteractionResponse::Modal(footer_modal()),
        ui::RULES_SETUP_CLEAR_BANNER => {
            let config = save(
                db,
                guild_id.get(),
                RulesConfig {
                    banner_url: None,
                    ..config
                },
            )
            .await?;

            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .embed(rules_setup_embed(&config))
                    .components(vec![rules_setup_buttons()]),
            )
        }
        other => {
            tracing::warn!("Unexpected rules setup button {}", other);
            return Ok(());
        }
    };

    component.create_response(&ctx.http, response).await?;

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Applies a submitted rules modal to `config`.
///
/// # Returns
/// - `Ok(RulesConfig)` - Updated, not yet sanitized config
/// - `Err(AppError::BadRequest)` - Empty bulk form or a banner that is not an image link
pub fn apply_modal(
    mut config: RulesConfig,
    custom_id: &str,
    value: impl Fn(&str) -> String,
) -> Result<RulesConfig, AppError> {
    match custom_id {
        ui::RULES_TEXTS_MODAL => {
            if let Some(title) = non_empty(value(INPUT_TITLE)) {
                config.title_text = title;
            }
            if let Some(welcome) = non_empty(value(INPUT_WELCOME)) {
                config.welcome_title = welcome;
            }
            if let Some(body) = non_empty(value(INPUT_BODY)) {
                config.welcome_body = body;
            }
            if let Some(description) = non_empty(value(INPUT_DESCRIPTION)) {
                config.description_text = description;
            }
        }
        ui::RULES_BULK_MODAL => {
            let entries: Vec<String> = (1..=BULK_INPUTS)
                .map(|n| value(&format!("{}{}", BULK_INPUT_PREFIX, n)))
                .collect();
            let categories = parse_bulk_rules(&entries);
            if categories.is_empty() {
                return Err(AppError::BadRequest("No rules provided.".to_string()));
            }
            config.categories = categories;
        }
        ui::RULES_BANNER_MODAL => match non_empty(value(INPUT_BANNER)) {
            Some(url) if is_valid_banner_url(&url) => config.banner_url = Some(url),
            Some(_) => {
                return Err(AppError::BadRequest(
                    "Banner must be an http(s) image link ending in png, jpg, jpeg, webp or gif."
                        .to_string(),
                ))
            }
            None => config.banner_url = None,
        },
        ui::RULES_FOOTER_MODAL => config.footer_text = non_empty(value(INPUT_FOOTER)),
        _ => {}
    }

    Ok(config)
}

pub async fn submit(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(modal.guild_id)?;
    let config = load(db, guild_id.get()).await?;

    let config = apply_modal(config, &modal.data.custom_id, |id| modal_value(modal, id))?;
    let config = save(db, guild_id.get(), config).await?;

    tracing::info!("Updated rules for guild {}", guild_id);

    modal
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Rules updated. Run /rules to post the new version.")
                    .embed(rules_setup_embed(&config))
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}
