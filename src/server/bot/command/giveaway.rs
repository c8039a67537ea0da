use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, ComponentInteraction, Context, CreateCommand,
    CreateCommandOption, InteractionContext, Permissions,
};

use crate::server::{
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::{
        giveaway::EntryToggle,
        setup_request::{MAX_GIVEAWAY_MINUTES, MAX_GIVEAWAY_WINNERS},
    },
    service::{
        giveaway::{GiveawayService, StartGiveaway},
        giveaway_message::GiveawayMessageService,
    },
};

use super::{ephemeral, int_option, require_guild, str_option};

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("giveaway_start")
            .description("Start a giveaway in this channel")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .contexts(vec![InteractionContext::Guild])
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "prize", "What is being given away")
                    .required(true)
                    .max_length(200),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "duration_minutes",
                    "How long the giveaway runs",
                )
                .required(true)
                .min_int_value(1)
                .max_int_value(u64::from(MAX_GIVEAWAY_MINUTES)),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "description",
                "Extra details shown on the giveaway",
            ))
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "winners", "Number of winners")
                    .min_int_value(1)
                    .max_int_value(u64::from(MAX_GIVEAWAY_WINNERS)),
            ),
        CreateCommand::new("giveaway_end")
            .description("End a giveaway now and draw the winners")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .contexts(vec![InteractionContext::Guild])
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "message_id",
                "Giveaway message, defaults to the latest one in this channel",
            )),
    ]
}

pub async fn giveaway_start(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;

    let prize = str_option(command, "prize").unwrap_or_default().to_string();
    let duration = int_option(command, "duration_minutes").unwrap_or(0);
    let winners = int_option(command, "winners").unwrap_or(1);

    let params = StartGiveaway {
        guild_id: guild_id.get(),
        channel_id: command.channel_id.get(),
        host_id: command.user.id.get(),
        prize,
        description: str_option(command, "description").map(str::to_string),
        duration_minutes: u32::try_from(duration).unwrap_or(0),
        winner_count: u32::try_from(winners).unwrap_or(1),
    };

    let giveaway = GiveawayMessageService::new(db, ctx.http.clone())
        .start(params, Utc::now())
        .await?;

    command
        .create_response(
            &ctx.http,
            ephemeral(format!(
                "Giveaway for **{}** started, ending <t:{}:R>.",
                giveaway.prize,
                giveaway.ends_at.timestamp()
            )),
        )
        .await?;

    Ok(())
}

pub async fn giveaway_end(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_guild(command.guild_id)?;

    let message_id = match str_option(command, "message_id") {
        Some(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|_| AppError::BadRequest("Invalid message ID.".to_string()))?,
        ),
        None => None,
    };

    let finished = GiveawayService::new(db)
        .end_now(command.channel_id.get(), message_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No running giveaway found in this channel.".to_string())
        })?;

    GiveawayMessageService::new(db, ctx.http.clone())
        .announce(&finished)
        .await?;

    command
        .create_response(&ctx.http, ephemeral("Giveaway ended."))
        .await?;

    Ok(())
}

/// Enter button: joins, or leaves when already entered.
pub async fn enter(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let message_id = component.message.id.get();

    let Some((toggle, entries)) = GiveawayService::new(db)
        .toggle_entry(message_id, component.user.id.get())
        .await?
    else {
        return Err(AppError::BadRequest("This giveaway has ended.".to_string()));
    };

    let reply = match toggle {
        EntryToggle::Entered => "🎉 You entered the giveaway. Good luck!",
        EntryToggle::Left => "You left the giveaway.",
    };
    component
        .create_response(&ctx.http, ephemeral(reply))
        .await?;

    if let Some(giveaway) = GiveawayRepository::new(db).find_by_message(message_id).await? {
        if let Err(e) = GiveawayMessageService::new(db, ctx.http.clone())
            .refresh_entries(&giveaway, entries)
            .await
        {
            tracing::warn!("Failed to refresh entries for giveaway {}: {}", giveaway.id, e);
        }
    }

    Ok(())
}
