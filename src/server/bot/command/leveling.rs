use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, InteractionContext,
};

use crate::server::{
    bot::ui::EMBED_COLOR,
    data::leveling::LevelingRepository,
    error::AppError,
    model::leveling::{progress_bar, MemberLevel},
    service::leveling::LevelingService,
};

use super::{require_guild, user_option};

const LEADERBOARD_SIZE: u64 = 10;
const PROGRESS_WIDTH: usize = 12;

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("rank")
            .description("Show a member's level and XP")
            .contexts(vec![InteractionContext::Guild])
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "user",
                "Member to look up, defaults to you",
            )),
        CreateCommand::new("leaderboard")
            .description("Show the most active members")
            .contexts(vec![InteractionContext::Guild]),
    ]
}

/// Medal for the podium, `#n` after it.
pub fn rank_prefix(position: usize) -> String {
    match position {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => format!("#{}", n),
    }
}

pub fn format_leaderboard(members: &[MemberLevel]) -> String {
    if members.is_empty() {
        return "Nobody has earned XP yet.".to_string();
    }

    members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            format!(
                "{} <@{}> Level {} ({} XP)",
                rank_prefix(index + 1),
                member.user_id,
                member.level,
                member.xp
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn rank(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let user_id = user_option(command, "user").unwrap_or(command.user.id);

    let Some((member, position)) = LevelingService::new(db)
        .rank(guild_id.get(), user_id.get())
        .await?
    else {
        return Err(AppError::NotFound(format!(
            "<@{}> has not earned any XP yet.",
            user_id
        )));
    };

    let (current, needed) = member.progress();
    let embed = CreateEmbed::new()
        .title("Rank")
        .description(format!("<@{}>", user_id))
        .field("Level", member.level.to_string(), true)
        .field("Rank", format!("#{}", position), true)
        .field("Total XP", member.xp.to_string(), true)
        .field(
            "Progress",
            format!(
                "{} {}/{}",
                progress_bar(current, needed, PROGRESS_WIDTH),
                current,
                needed
            ),
            false,
        )
        .color(EMBED_COLOR);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed)),
        )
        .await?;

    Ok(())
}

pub async fn leaderboard(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let top = LevelingRepository::new(db)
        .top(guild_id.get(), LEADERBOARD_SIZE)
        .await?;

    let embed = CreateEmbed::new()
        .title("🏆 Leaderboard")
        .description(format_leaderboard(&top))
        .color(EMBED_COLOR);

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed)),
        )
        .await?;

    Ok(())
}
