//! Built in templates offered by `/setup` and the dashboard.

use serenity::all::Permissions;

use crate::server::model::template::{ServerTemplate, TemplateCategory, TemplateChannel, TemplateRole};

pub const TEMPLATE_NAMES: [&str; 4] = ["gaming", "community", "support", "creative"];
pub const FALLBACK_TEMPLATE: &str = "community";

pub const VERIFIED_ROLE_NAME: &str = "✅ Verified";
pub const VERIFIED_ROLE_COLOR: u32 = 0x43B581;

pub fn is_known(name: &str) -> bool {
    TEMPLATE_NAMES.contains(&name.trim().to_lowercase().as_str())
}

fn role(name: &str, color: u32, permissions: u64, hoist: bool, mentionable: bool) -> TemplateRole {
    TemplateRole {
        name: name.to_string(),
        color,
        permissions,
        hoist,
        mentionable,
    }
}

fn staff_roles() -> Vec<TemplateRole> {
    vec![
        role("👑 Admin", 0xF04747, Permissions::ADMINISTRATOR.bits(), true, false),
        role("🛡️ Moderator", 0x5865F2, 0, true, true),
        role(VERIFIED_ROLE_NAME, VERIFIED_ROLE_COLOR, 0, false, true),
    ]
}

fn category(name: &str, channels: Vec<TemplateChannel>) -> TemplateCategory {
    TemplateCategory {
        name: name.to_string(),
        channels,
    }
}

fn text(name: &str) -> TemplateChannel {
    TemplateChannel::text(name, None)
}

fn topic(name: &str, topic: &str) -> TemplateChannel {
    TemplateChannel::text(name, Some(topic))
}

fn voice(name: &str) -> TemplateChannel {
    TemplateChannel::voice(name)
}

/// Resolves a catalog template by name, falling back to `community`.
pub fn template(name: &str) -> ServerTemplate {
    let mut roles = staff_roles();

    let (theme_role, categories) = match name.trim().to_lowercase().as_str() {
        "gaming" => (
            role("🎮 Gamer", 0x00FF88, 0, false, false),
            vec![
                category(
                    "📣 ANNOUNCEMENTS",
                    vec![
                        topic("📢-news", "Server updates"),
                        topic("🎉-events", "Giveaways and tournaments"),
                    ],
                ),
                category(
                    "💬 LOBBY",
                    vec![
                        topic("👋-welcome", "Introduce yourself"),
                        topic("💭-chat", "General chat"),
                        voice("🔊 Squad 1"),
                    ],
                ),
                category(
                    "🎮 GAMES",
                    vec![
                        topic("🥇-ranked", "Ranked coordination"),
                        topic("🤝-lfg", "Find teammates"),
                        voice("🎧 Game Chat"),
                    ],
                ),
            ],
        ),
        "support" => (
            role("🙋 Customer", 0xFFB347, 0, false, false),
            vec![
                category("ℹ️ START HERE", vec![text("welcome"), topic("faq", "Common questions")]),
                category(
                    "🎟️ SUPPORT",
                    vec![
                        topic("create-ticket", "Open support tickets"),
                        topic("transcripts", "Closed ticket logs"),
                        voice("Support VC"),
                    ],
                ),
                category("📚 KNOWLEDGE BASE", vec![text("guides"), text("updates")]),
            ],
        ),
        "creative" => (
            role("🎨 Creator", 0xE67E22, 0, false, false),
            vec![
                category("📣 NEWS", vec![text("announcements"), text("roadmap")]),
                category(
                    "🖼️ SHOWCASE",
                    vec![
                        topic("art-drop", "Share art"),
                        topic("critiques", "Get feedback"),
                        voice("Studio"),
                    ],
                ),
                category("💡 COLLAB", vec![text("ideas"), text("work-in-progress")]),
            ],
        ),
        _ => (
            role("🎭 Member", 0x99AAB5, 0, false, false),
            vec![
                category("📣 INFO", vec![text("📢-announcements"), text("📜-rules")]),
                category(
                    "💬 COMMUNITY",
                    vec![
                        topic("general", "Chat with everyone"),
                        topic("media-share", "Images and clips"),
                        voice("Lounge"),
                    ],
                ),
                category("🎉 EVENTS", vec![text("giveaways"), text("polls")]),
            ],
        ),
    };

    roles.push(theme_role);

    ServerTemplate { roles, categories }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::template::ChannelKind;

    #[test]
    fn unknown_name_falls_back_to_community() {
        assert_eq!(template("nope"), template(FALLBACK_TEMPLATE));
        assert!(!is_known("nope"));
        assert!(is_known(" Gaming "));
    }

    #[test]
    fn every_template_has_staff_and_theme_roles() {
        for name in TEMPLATE_NAMES {
            let template = template(name);
            assert_eq!(template.roles.len(), 4);
            assert_eq!(template.roles[0].permissions, Permissions::ADMINISTRATOR.bits());
            assert_eq!(template.categories.len(), 3);
        }
    }

    #[test]
    fn gaming_has_voice_channels() {
        let voice_channels = template("gaming")
            .categories
            .iter()
            .flat_map(|category| category.channels.iter())
            .filter(|channel| channel.kind == ChannelKind::Voice)
            .count();

        assert_eq!(voice_channels, 2);
    }
}
