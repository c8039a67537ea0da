//! Moderation commands and the optional moderation log.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateMessage, EditChannel, EditMember, GetMessages, GuildId,
    InteractionContext, Permissions, Timestamp, UserId,
};

use crate::server::{
    data::{guild_config::GuildConfigRepository, moderation::ModerationRepository},
    error::AppError,
    model::{
        guild_config::KEY_MOD_LOG_CHANNEL_ID,
        moderation::{
            CreateWarningParam, ModAction, Warning, MAX_PURGE, MAX_SLOWMODE_SECONDS,
            MAX_TIMEOUT_MINUTES,
        },
    },
};

use super::{ephemeral, int_option, require_guild, str_option, user_option};

const MOD_LOG_COLOR: u32 = 0xE67E22;
const NO_REASON: &str = "No reason provided";

fn user_arg(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "user", description).required(true)
}

fn reason_arg() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for the action")
        .max_length(500)
}

fn moderation_command(name: &str, description: &str, permission: Permissions) -> CreateCommand {
    CreateCommand::new(name)
        .description(description)
        .default_member_permissions(permission)
        .contexts(vec![InteractionContext::Guild])
}

pub fn commands() -> Vec<CreateCommand> {
    vec![
        moderation_command("kick", "Kick a member", Permissions::KICK_MEMBERS)
            .add_option(user_arg("Member to kick"))
            .add_option(reason_arg()),
        moderation_command("ban", "Ban a member", Permissions::BAN_MEMBERS)
            .add_option(user_arg("Member to ban"))
            .add_option(reason_arg()),
        moderation_command("timeout", "Time out a member", Permissions::MODERATE_MEMBERS)
            .add_option(user_arg("Member to time out"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "minutes", "Timeout length")
                    .required(true)
                    .min_int_value(1)
                    .max_int_value(MAX_TIMEOUT_MINUTES as u64),
            )
            .add_option(reason_arg()),
        moderation_command("warn", "Warn a member", Permissions::MODERATE_MEMBERS)
            .add_option(user_arg("Member to warn"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for the warning")
                    .required(true)
                    .max_length(500),
            ),
        moderation_command("warnings", "List a member's warnings", Permissions::MODERATE_MEMBERS)
            .add_option(user_arg("Member to look up")),
        moderation_command("purge", "Delete recent messages in this channel", Permissions::MANAGE_MESSAGES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "amount", "Messages to delete")
                    .required(true)
                    .min_int_value(1)
                    .max_int_value(MAX_PURGE as u64),
            ),
        moderation_command("slowmode", "Set this channel's slowmode", Permissions::MANAGE_CHANNELS)
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "seconds", "0 turns slowmode off")
                    .required(true)
                    .min_int_value(0)
                    .max_int_value(MAX_SLOWMODE_SECONDS as u64),
            ),
    ]
}

pub fn mod_log_embed(
    action: ModAction,
    target: Option<UserId>,
    moderator: UserId,
    channel_id: ChannelId,
    reason: &str,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("🛡️ {}", action.label()))
        .color(MOD_LOG_COLOR)
        .field("Moderator", format!("<@{}>", moderator), true)
        .field("Channel", format!("<#{}>", channel_id), true)
        .timestamp(Timestamp::now());

    if let Some(target) = target {
        embed = embed.field("Member", format!("<@{}>", target), true);
    }
    if !matches!(action, ModAction::Purge { .. } | ModAction::Slowmode { .. }) {
        embed = embed.field("Reason", reason, false);
    }

    embed
}

pub fn format_warnings(user_id: UserId, warnings: &[Warning]) -> String {
    if warnings.is_empty() {
        return format!("<@{}> has no warnings.", user_id);
    }

    let lines = warnings
        .iter()
        .map(|warning| {
            format!(
                "`#{}` <t:{}:d> by <@{}>: {}",
                warning.id,
                warning.created_at.timestamp(),
                warning.moderator_id,
                warning.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("<@{}> has {} warning(s):\n{}", user_id, warnings.len(), lines)
}

/// Posts to the guild's moderation log channel when one is configured.
async fn log_action(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: GuildId,
    embed: CreateEmbed,
) -> Result<(), AppError> {
    let settings = GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await?;

    if let Some(channel_id) = settings.id(KEY_MOD_LOG_CHANNEL_ID) {
        ChannelId::new(channel_id)
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await?;
    }

    Ok(())
}

fn required_user(command: &CommandInteraction) -> Result<UserId, AppError> {
    user_option(command, "user")
        .ok_or_else(|| AppError::BadRequest("Pick a member.".to_string()))
}

pub async fn run(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let moderator = command.user.id;
    let reason = str_option(command, "reason")
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(NO_REASON)
        .to_string();

    let (action, target, reply) = match command.data.name.as_str() {
        "kick" => {
            let user_id = required_user(command)?;
            guild_id
                .kick_with_reason(&ctx.http, user_id, &reason)
                .await?;
            (ModAction::Kick, Some(user_id), format!("Kicked <@{}>.", user_id))
        }
        "ban" => {
            let user_id = required_user(command)?;
            guild_id
                .ban_with_reason(&ctx.http, user_id, 0, &reason)
                .await?;
            (ModAction::Ban, Some(user_id), format!("Banned <@{}>.", user_id))
        }
        "timeout" => {
            let user_id = required_user(command)?;
            let minutes = int_option(command, "minutes")
                .unwrap_or(0)
                .clamp(1, MAX_TIMEOUT_MINUTES);
            let until = Timestamp::from_unix_timestamp(
                (Utc::now() + Duration::minutes(minutes)).timestamp(),
            )
            .map_err(|e| AppError::InternalError(format!("Invalid timeout end: {}", e)))?;

            guild_id
                .edit_member(
                    &ctx.http,
                    user_id,
                    EditMember::new()
                        .disable_communication_until_datetime(until)
                        .audit_log_reason(&reason),
                )
                .await?;
            (
                ModAction::Timeout { minutes },
                Some(user_id),
                format!("Timed out <@{}> for {} minutes.", user_id, minutes),
            )
        }
        "warn" => {
            let user_id = required_user(command)?;
            let repo = ModerationRepository::new(db);
            repo.add_warning(CreateWarningParam {
                guild_id: guild_id.get(),
                user_id: user_id.get(),
                moderator_id: moderator.get(),
                reason: reason.clone(),
            })
            .await?;
            let count = repo.list(guild_id.get(), user_id.get()).await?.len();
            (
                ModAction::Warn,
                Some(user_id),
                format!("Warned <@{}>. They now have {} warning(s).", user_id, count),
            )
        }
        "warnings" => {
            let user_id = required_user(command)?;
            let warnings = ModerationRepository::new(db)
                .list(guild_id.get(), user_id.get())
                .await?;
            command
                .create_response(&ctx.http, ephemeral(format_warnings(user_id, &warnings)))
                .await?;
            return Ok(());
        }
        "purge" => {
            let amount = int_option(command, "amount").unwrap_or(0).clamp(1, MAX_PURGE) as u8;
            let messages = command
                .channel_id
                .messages(&ctx.http, GetMessages::new().limit(amount))
                .await?;
            let ids: Vec<_> = messages.iter().map(|message| message.id).collect();

            match ids.as_slice() {
                [] => {}
                [single] => command.channel_id.delete_message(&ctx.http, *single).await?,
                _ => command.channel_id.delete_messages(&ctx.http, &ids).await?,
            }
            (
                ModAction::Purge { count: ids.len() },
                None,
                format!("Deleted {} messages.", ids.len()),
            )
        }
        "slowmode" => {
            let seconds = int_option(command, "seconds")
                .unwrap_or(0)
                .clamp(0, MAX_SLOWMODE_SECONDS);
            command
                .channel_id
                .edit(&ctx.http, EditChannel::new().rate_limit_per_user(seconds as u16))
                .await?;
            let reply = if seconds == 0 {
                "Slowmode disabled.".to_string()
            } else {
                format!("Slowmode set to {} seconds.", seconds)
            };
            (ModAction::Slowmode { seconds }, None, reply)
        }
        other => {
            return Err(AppError::BadRequest(format!("Unknown command /{}", other)));
        }
    };

    tracing::info!(
        "{} by {} in guild {} (target: {:?})",
        action.label(),
        moderator,
        guild_id,
        target.map(|id| id.get())
    );

    command.create_response(&ctx.http, ephemeral(reply)).await?;

    let embed = mod_log_embed(action, target, moderator, command.channel_id, &reason);
    if let Err(e) = log_action(db, ctx, guild_id, embed).await {
        tracing::warn!("Failed to write moderation log for guild {}: {}", guild_id, e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_embed_includes_reason_for_member_actions() {
        let embed = mod_log_embed(
            ModAction::Timeout { minutes: 10 },
            Some(UserId::new(2)),
            UserId::new(1),
            ChannelId::new(3),
            "Spamming",
        );

        let json = serde_json::to_value(embed).unwrap();
        assert_eq!(json["title"], "🛡️ Timeout (10 min)");
        let fields = json["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[3]["value"], "Spamming");
    }

    #[test]
    fn purge_log_has_no_reason() {
        let embed = mod_log_embed(
            ModAction::Purge { count: 5 },
            None,
            UserId::new(1),
            ChannelId::new(3),
            NO_REASON,
        );

        let json = serde_json::to_value(embed).unwrap();
        assert_eq!(json["fields"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn no_warnings_message() {
        assert_eq!(format_warnings(UserId::new(5), &[]), "<@5> has no warnings.");
    }
}
