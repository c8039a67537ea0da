//! Guild message handling: the verification gate, custom commands and XP.

use std::time::Duration;

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Context, CreateEmbed, CreateMessage, GuildId, Message, RoleId};

use crate::server::{
    bot::ui::EMBED_COLOR,
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::{
        custom_command::{invoked_name, render, RenderContext},
        guild_config::{GuildSettings, KEY_LEVEL_UP_CHANNEL_ID},
        leveling::XpAward,
    },
    service::{custom_command::CustomCommandService, leveling::LevelingService},
};

/// How long the "please verify" notice stays up.
const VERIFY_NOTICE_SECONDS: u64 = 5;

/// Handle message creation in a guild channel
pub async fn handle_message(db: &DatabaseConnection, ctx: Context, message: Message) {
    let Some(guild_id) = message.guild_id else {
        return;
    };
    if message.author.bot {
        return;
    }

    let settings = match GuildConfigRepository::new(db)
        .get_or_default(guild_id.get())
        .await
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings for guild {}: {}", guild_id, e);
            return;
        }
    };

    if gate_unverified(&ctx, &settings, &message).await {
        return;
    }

    if let Err(e) = reply_custom_command(db, &ctx, &settings, &message).await {
        tracing::error!(
            "Failed to answer custom command in guild {}: {}",
            guild_id,
            e
        );
    }

    if let Err(e) = award_xp(db, &ctx, &settings, &message).await {
        tracing::error!(
            "Failed to award XP to {} in guild {}: {}",
            message.author.id,
            guild_id,
            e
        );
    }
}

/// Deletes messages from members lacking the verified role.
///
/// Returns `true` when the message was gated.
async fn gate_unverified(ctx: &Context, settings: &GuildSettings, message: &Message) -> bool {
    let verify = settings.verify();
    if !verify.gate_active() {
        return false;
    }
    let (Some(verified), Some(member)) = (verify.verified_role_id(), message.member.as_ref())
    else {
        return false;
    };
    if member.roles.contains(&verified) {
        return false;
    }

    if let Err(e) = message.delete(&ctx.http).await {
        tracing::debug!("Could not delete unverified message {}: {}", message.id, e);
    }

    let notice = match message
        .channel_id
        .say(
            &ctx.http,
            format!(
                "<@{}>, please verify first using /verify to get access.",
                message.author.id
            ),
        )
        .await
    {
        Ok(notice) => notice,
        Err(e) => {
            tracing::warn!("Failed to post verify notice in {}: {}", message.channel_id, e);
            return true;
        }
    };

    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(VERIFY_NOTICE_SECONDS)).await;
        if let Err(e) = notice.delete(&http).await {
            tracing::debug!("Could not delete verify notice {}: {}", notice.id, e);
        }
    });

    true
}

async fn reply_custom_command(
    db: &DatabaseConnection,
    ctx: &Context,
    settings: &GuildSettings,
    message: &Message,
) -> Result<(), AppError> {
    let prefix = settings.prefix();
    let Some(name) = invoked_name(&message.content, &prefix) else {
        return Ok(());
    };

    let Some(command) = CustomCommandService::new(db)
        .find(settings.guild_id, &name.to_lowercase())
        .await?
    else {
        return Ok(());
    };

    let server = message
        .guild_id
        .and_then(|guild_id| guild_id.name(&ctx.cache))
        .unwrap_or_default();
    let text = render(
        &command.response,
        &RenderContext {
            user: &format!("<@{}>", message.author.id),
            server: &server,
            channel: &format!("<#{}>", message.channel_id),
        },
    );

    let reply = if command.is_embed {
        CreateMessage::new().embed(CreateEmbed::new().description(text).color(EMBED_COLOR))
    } else {
        CreateMessage::new().content(text)
    };
    message.channel_id.send_message(&ctx.http, reply).await?;

    tracing::debug!(
        "Answered custom command {}{} in guild {}",
        prefix,
        command.name,
        settings.guild_id
    );

    Ok(())
}

/// Tracks message XP, announces level ups and grants level roles.
async fn award_xp(
    db: &DatabaseConnection,
    ctx: &Context,
    settings: &GuildSettings,
    message: &Message,
) -> Result<(), AppError> {
    // ThreadRng is not Send, so the roll uses an owned generator.
    let mut rng = StdRng::from_os_rng();
    let service = LevelingService::new(db);
    let award = service
        .record_message(
            settings.guild_id,
            message.author.id.get(),
            Utc::now(),
            &mut rng,
        )
        .await?;

    let XpAward::Gained {
        member,
        leveled_up: true,
    } = award
    else {
        return Ok(());
    };

    let channel_id = settings
        .id(KEY_LEVEL_UP_CHANNEL_ID)
        .map(ChannelId::new)
        .unwrap_or(message.channel_id);
    channel_id
        .say(
            &ctx.http,
            format!(
                "🎉 <@{}> reached **level {}**!",
                message.author.id, member.level
            ),
        )
        .await?;

    let held: &[RoleId] = message
        .member
        .as_ref()
        .map(|member| member.roles.as_slice())
        .unwrap_or_default();

    for reward in service.rewards_for(settings.guild_id, member.level).await? {
        let role_id = RoleId::new(reward.role_id);
        if held.contains(&role_id) {
            continue;
        }

        if let Err(e) = ctx
            .http
            .add_member_role(
                GuildId::new(settings.guild_id),
                message.author.id,
                role_id,
                Some("Level reward"),
            )
            .await
        {
            tracing::warn!(
                "Failed to grant level role {} to {} in guild {}: {}",
                role_id,
                message.author.id,
                settings.guild_id,
                e
            );
        }
    }

    Ok(())
}
