use sea_orm::DatabaseConnection;
use serenity::all::{Context, Member};

use crate::server::data::guild_config::GuildConfigRepository;

/// Gives new members the configured unverified role.
pub async fn handle_guild_member_addition(db: &DatabaseConnection, ctx: Context, member: Member) {
    if member.user.bot {
        return;
    }

    let guild_id = member.guild_id;
    let settings = match GuildConfigRepository::new(db).get(guild_id.get()).await {
        Ok(Some(settings)) => settings,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to load settings for guild {}: {}", guild_id, e);
            return;
        }
    };

    let Some(role_id) = settings.verify().unverified_role_id() else {
        return;
    };

    if let Err(e) = member.add_role(&ctx.http, role_id).await {
        tracing::warn!(
            "Failed to give unverified role {} to {} in guild {}: {}",
            role_id,
            member.user.id,
            guild_id,
            e
        );
    } else {
        tracing::debug!(
            "Gave unverified role {} to {} in guild {}",
            role_id,
            member.user.id,
            guild_id
        );
    }
}
