//! Private ticket channels opened from the ticket panel.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, ComponentInteraction, Context, CreateChannel,
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, GetMessages, GuildId, InteractionContext, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::server::{
    bot::ui::ticket::{ticket_panel as panel_message, ticket_welcome, transcript_message},
    data::{guild_config::GuildConfigRepository, ticket::TicketRepository},
    error::AppError,
    model::ticket::{
        channel_name, format_transcript, CreateTicketParam, TicketTopic, TranscriptLine,
        TRANSCRIPT_LIMIT,
    },
};

use super::{ephemeral, require_guild, selected_value};

pub fn commands() -> Vec<CreateCommand> {
    vec![CreateCommand::new("ticket_panel")
        .description("Post the support ticket panel in this channel")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .contexts(vec![InteractionContext::Guild])]
}

pub async fn ticket_panel(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    require_guild(command.guild_id)?;

    command
        .channel_id
        .send_message(&ctx.http, panel_message())
        .await?;
    command
        .create_response(&ctx.http, ephemeral("Ticket panel posted."))
        .await?;

    Ok(())
}

/// Hides the channel from everyone except the opener and the bot.
pub fn ticket_overwrites(
    guild_id: GuildId,
    user_id: UserId,
    bot_id: UserId,
) -> Vec<PermissionOverwrite> {
    let access = Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES;

    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: access,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(user_id),
        },
        PermissionOverwrite {
            allow: access | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_id),
        },
    ]
}

pub async fn open(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let user = &component.user;

    let topic = selected_value(component)
        .and_then(TicketTopic::from_value)
        .unwrap_or(TicketTopic::Other);

    let repo = TicketRepository::new(db);
    if let Some(existing) = repo.find_open_for_user(guild_id.get(), user.id.get()).await? {
        return Err(AppError::BadRequest(format!(
            "You already have an open ticket: <#{}>",
            existing.channel_id
        )));
    }

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true)),
        )
        .await?;

    let settings = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?
        .tickets();

    let bot_id = ctx.cache.current_user().id;
    let mut builder = CreateChannel::new(channel_name(topic, &user.name))
        .kind(ChannelType::Text)
        .topic(format!("{} ticket for {}", topic.label(), user.name))
        .permissions(ticket_overwrites(guild_id, user.id, bot_id));
    if let Some(category_id) = settings.category_id {
        builder = builder.category(ChannelId::new(category_id));
    }

    let channel = guild_id.create_channel(&ctx.http, builder).await?;

    repo.create(CreateTicketParam {
        guild_id: guild_id.get(),
        channel_id: channel.id.get(),
        user_id: user.id.get(),
        topic,
    })
    .await?;

    channel
        .id
        .send_message(&ctx.http, ticket_welcome(user.id.get(), topic))
        .await?;

    tracing::info!(
        "Opened {} ticket {} for {} in guild {}",
        topic.value(),
        channel.id,
        user.id,
        guild_id
    );

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Ticket opened: <#{}>", channel.id)),
        )
        .await?;

    Ok(())
}

/// Last messages of the channel, oldest first.
async fn collect_transcript(ctx: &Context, channel_id: ChannelId) -> Result<String, AppError> {
    let messages = channel_id
        .messages(&ctx.http, GetMessages::new().limit(TRANSCRIPT_LIMIT))
        .await?;

    let lines: Vec<TranscriptLine> = messages
        .into_iter()
        .rev()
        .map(|message| TranscriptLine {
            at: message.timestamp.to_utc(),
            author: message.author.name,
            content: message.content,
        })
        .collect();

    Ok(format_transcript(&lines))
}

pub async fn close(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(component.guild_id)?;
    let channel_id = component.channel_id;

    let repo = TicketRepository::new(db);
    let Some(ticket) = repo
        .find_by_channel(channel_id.get())
        .await?
        .filter(|ticket| !ticket.closed)
    else {
        return Err(AppError::BadRequest("This ticket is already closed.".to_string()));
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content("🔒 Closing this ticket..."),
            ),
        )
        .await?;

    let settings = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?
        .tickets();

    if let (true, Some(transcript_channel)) =
        (settings.save_transcripts, settings.transcript_channel_id)
    {
        match collect_transcript(ctx, channel_id).await {
            Ok(transcript) => {
                if let Err(e) = ChannelId::new(transcript_channel)
                    .send_message(
                        &ctx.http,
                        transcript_message(&ticket, component.user.id.get(), transcript),
                    )
                    .await
                {
                    tracing::error!(
                        "Failed to post transcript for ticket {} in guild {}: {}",
                        ticket.id,
                        guild_id,
                        e
                    );
                }
            }
            Err(e) => tracing::error!("Failed to read ticket {} messages: {}", ticket.id, e),
        }
    }

    repo.close(channel_id.get()).await?;
    channel_id.delete(&ctx.http).await?;

    tracing::info!(
        "Closed ticket {} in guild {} by {}",
        ticket.id,
        guild_id,
        component.user.id
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_is_hidden_from_everyone() {
        let overwrites = ticket_overwrites(GuildId::new(1), UserId::new(2), UserId::new(3));

        assert_eq!(
            overwrites[0].kind,
            PermissionOverwriteType::Role(RoleId::new(1))
        );
        assert!(overwrites[0].deny.view_channel());
        assert!(overwrites[1].allow.send_messages());
        assert!(overwrites[2].allow.manage_channels());
    }
}
