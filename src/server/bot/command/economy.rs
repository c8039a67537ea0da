use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, InteractionContext,
};

use crate::server::{
    bot::ui::EMBED_COLOR,
    data::economy::EconomyRepository,
    error::AppError,
    model::economy::{
        format_remaining, DailyOutcome, EconomyAccount, TransferOutcome, DAILY_REWARD,
    },
};

use super::{int_option, leveling::rank_prefix, require_guild, user_option};

const RICHEST_SIZE: u64 = 10;

pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("balance")
            .description("Show a member's coin balance")
            .contexts(vec![InteractionContext::Guild])
            .add_option(CreateCommandOption::new(
                CommandOptionType::User,
                "user",
                "Member to look up, defaults to you",
            )),
        CreateCommand::new("daily")
            .description(format!("Claim your daily {} coins", DAILY_REWARD))
            .contexts(vec![InteractionContext::Guild]),
        CreateCommand::new("pay")
            .description("Send coins to another member")
            .contexts(vec![InteractionContext::Guild])
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Recipient")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "amount", "Coins to send")
                    .required(true)
                    .min_int_value(1),
            ),
        CreateCommand::new("richest")
            .description("Show the richest members")
            .contexts(vec![InteractionContext::Guild]),
    ]
}

async fn reply(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed) -> Result<(), AppError> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed.color(EMBED_COLOR)),
            ),
        )
        .await?;

    Ok(())
}

pub async fn balance(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let user_id = user_option(command, "user").unwrap_or(command.user.id);

    let account = EconomyRepository::new(db)
        .get_or_create(guild_id.get(), user_id.get())
        .await?;

    reply(
        ctx,
        command,
        CreateEmbed::new()
            .title("💰 Balance")
            .description(format!("<@{}> has **{}** coins.", user_id, account.balance)),
    )
    .await
}

pub fn daily_text(outcome: &DailyOutcome) -> String {
    match outcome {
        DailyOutcome::Claimed { balance } => format!(
            "You claimed **{}** coins. New balance: **{}**.",
            DAILY_REWARD, balance
        ),
        DailyOutcome::Cooldown { available_at } => format!(
            "You already claimed today. Come back in **{}**.",
            format_remaining(*available_at - Utc::now())
        ),
    }
}

pub async fn daily(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;

    let outcome = EconomyRepository::new(db)
        .claim_daily(guild_id.get(), command.user.id.get(), Utc::now())
        .await?;

    reply(
        ctx,
        command,
        CreateEmbed::new()
            .title("📅 Daily Reward")
            .description(daily_text(&outcome)),
    )
    .await
}

pub fn transfer_text(outcome: &TransferOutcome, recipient: u64, amount: i64) -> Result<String, AppError> {
    match outcome {
        TransferOutcome::Sent { sender_balance } => Ok(format!(
            "Sent **{}** coins to <@{}>. Your balance: **{}**.",
            amount, recipient, sender_balance
        )),
        TransferOutcome::InsufficientFunds { balance } => Err(AppError::BadRequest(format!(
            "You only have {} coins.",
            balance
        ))),
        TransferOutcome::InvalidAmount => Err(AppError::BadRequest(
            "Amount must be a positive number.".to_string(),
        )),
        TransferOutcome::SelfTransfer => Err(AppError::BadRequest(
            "You cannot pay yourself.".to_string(),
        )),
    }
}

pub async fn pay(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let recipient = user_option(command, "user")
        .ok_or_else(|| AppError::BadRequest("Pick a member to pay.".to_string()))?;
    let amount = int_option(command, "amount").unwrap_or(0);

    let outcome = EconomyRepository::new(db)
        .transfer(guild_id.get(), command.user.id.get(), recipient.get(), amount)
        .await?;
    let text = transfer_text(&outcome, recipient.get(), amount)?;

    tracing::debug!(
        "{} paid {} coins to {} in guild {}",
        command.user.id,
        amount,
        recipient,
        guild_id
    );

    reply(
        ctx,
        command,
        CreateEmbed::new().title("💸 Payment").description(text),
    )
    .await
}

pub fn format_richest(accounts: &[EconomyAccount]) -> String {
    if accounts.is_empty() {
        return "No balances yet. Use /daily to get started.".to_string();
    }

    accounts
        .iter()
        .enumerate()
        .map(|(index, account)| {
            format!(
                "{} <@{}> {} coins",
                rank_prefix(index + 1),
                account.user_id,
                account.balance
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn richest(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command.guild_id)?;
    let accounts = EconomyRepository::new(db)
        .richest(guild_id.get(), RICHEST_SIZE)
        .await?;

    reply(
        ctx,
        command,
        CreateEmbed::new()
            .title("🏦 Richest Members")
            .description(format_richest(&accounts)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_transfers_become_member_errors() {
        let err = transfer_text(&TransferOutcome::InsufficientFunds { balance: 50 }, 2, 100)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "You only have 50 coins."));

        let text = transfer_text(&TransferOutcome::Sent { sender_balance: 150 }, 2, 50).unwrap();
        assert_eq!(text, "Sent **50** coins to <@2>. Your balance: **150**.");
    }

    #[test]
    fn claimed_daily_reports_balance() {
        assert_eq!(
            daily_text(&DailyOutcome::Claimed { balance: 400 }),
            "You claimed **200** coins. New balance: **400**."
        );
    }

    #[test]
    fn richest_lists_balances() {
        let accounts = vec![EconomyAccount {
            guild_id: 1,
            user_id: 9,
            balance: 700,
            last_daily_at: None,
        }];

        assert_eq!(format_richest(&accounts), "🥇 <@9> 700 coins");
    }
}
