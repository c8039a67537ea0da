//! Applies a [`ServerTemplate`] to a live guild.

use serenity::{
    all::{ChannelId, ChannelType, CreateChannel, EditRole, GuildId, Permissions},
    http::Http,
};

use crate::server::model::template::{ChannelKind, ServerTemplate, TemplateChannel, TemplateRole};

const AUDIT_REASON: &str = "Server template";

/// What a template build created. Failed items are logged and counted, never fatal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub roles: usize,
    pub categories: usize,
    pub channels: usize,
    pub failed: usize,
}

pub fn role_builder(role: &TemplateRole) -> EditRole<'_> {
    EditRole::new()
        .name(&role.name)
        .colour(role.color)
        .hoist(role.hoist)
        .mentionable(role.mentionable)
        .permissions(Permissions::from_bits_truncate(role.permissions))
        .audit_log_reason(AUDIT_REASON)
}

pub fn channel_builder(channel: &TemplateChannel, category: Option<ChannelId>) -> CreateChannel<'_> {
    let mut builder = CreateChannel::new(&channel.name).audit_log_reason(AUDIT_REASON);
    builder = match channel.kind {
        ChannelKind::Text => {
            let builder = builder.kind(ChannelType::Text);
            match &channel.topic {
                Some(topic) => builder.topic(topic),
                None => builder,
            }
        }
        ChannelKind::Voice => builder.kind(ChannelType::Voice),
    };

    match category {
        Some(category) => builder.category(category),
        None => builder,
    }
}

/// Creates the template's roles, then each category followed by its channels.
///
/// A category that fails to create still gets its channels, placed at the top level.
pub async fn build(http: &Http, guild_id: GuildId, template: &ServerTemplate) -> BuildReport {
    let mut report = BuildReport::default();

    for role in &template.roles {
        match guild_id.create_role(http, role_builder(role)).await {
            Ok(_) => report.roles += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    "Failed to create template role '{}' in guild {}: {}",
                    role.name,
                    guild_id,
                    e
                );
            }
        }
    }

    for category in &template.categories {
        let parent = match guild_id
            .create_channel(
                http,
                CreateChannel::new(&category.name)
                    .kind(ChannelType::Category)
                    .audit_log_reason(AUDIT_REASON),
            )
            .await
        {
            Ok(created) => {
                report.categories += 1;
                Some(created.id)
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    "Failed to create template category '{}' in guild {}: {}",
                    category.name,
                    guild_id,
                    e
                );
                None
            }
        };

        for channel in &category.channels {
            match guild_id
                .create_channel(http, channel_builder(channel, parent))
                .await
            {
                Ok(_) => report.channels += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        "Failed to create template channel '{}' in guild {}: {}",
                        channel.name,
                        guild_id,
                        e
                    );
                }
            }
        }
    }

    tracing::info!(
        "Built template in guild {}: {} roles, {} categories, {} channels, {} failed",
        guild_id,
        report.roles,
        report.categories,
        report.channels,
        report.failed
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_builder_carries_template_fields() {
        let role = TemplateRole {
            name: "🛡️ Moderator".to_string(),
            color: 0x3498DB,
            permissions: Permissions::KICK_MEMBERS.bits(),
            hoist: true,
            mentionable: false,
        };

        let json = serde_json::to_value(role_builder(&role)).unwrap();

        assert_eq!(json["name"], "🛡️ Moderator");
        assert_eq!(json["color"], 0x3498DB);
        assert_eq!(json["hoist"], true);
        assert_eq!(json["mentionable"], false);
    }

    #[test]
    fn text_channel_keeps_topic() {
        let channel = TemplateChannel::text("💭-chat", Some("General chat"));

        let json = serde_json::to_value(channel_builder(&channel, None)).unwrap();

        assert_eq!(json["name"], "💭-chat");
        assert_eq!(json["type"], 0);
        assert_eq!(json["topic"], "General chat");
    }

    #[test]
    fn voice_channel_has_no_topic() {
        let channel = TemplateChannel::voice("🔊 Squad 1");

        let json = serde_json::to_value(channel_builder(&channel, Some(ChannelId::new(42)))).unwrap();

        assert_eq!(json["type"], 2);
        assert!(json["topic"].is_null());
        assert!(!json["parent_id"].is_null());
    }
}
