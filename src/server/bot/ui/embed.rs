//! Dashboard authored embeds and announcements.

use serenity::all::{CreateAllowedMentions, CreateEmbed, CreateEmbedFooter, CreateMessage};

use crate::server::model::setup_request::{AnnouncementKind, AnnouncementPayload, EmbedPayload};

use super::EMBED_COLOR;

pub fn custom_embed(payload: &EmbedPayload) -> CreateEmbed {
    let mut embed = CreateEmbed::new().color(payload.color.unwrap_or(EMBED_COLOR));

    if let Some(title) = &payload.title {
        embed = embed.title(title);
    }
    if let Some(description) = &payload.description {
        embed = embed.description(description);
    }
    if let Some(footer) = &payload.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(image) = &payload.image {
        embed = embed.image(image);
    }
    if let Some(thumbnail) = &payload.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    for field in &payload.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    embed
}

fn announcement_style(kind: AnnouncementKind) -> (&'static str, u32) {
    match kind {
        AnnouncementKind::Normal => ("📢 Announcement", 0x3498DB),
        AnnouncementKind::Important => ("⚠️ Important Announcement", 0xE74C3C),
        AnnouncementKind::Event => ("🎉 Event Announcement", 0x9B59B6),
    }
}

/// Announcement message, pinging `@everyone` only when asked to.
pub fn announcement(payload: &AnnouncementPayload) -> CreateMessage {
    let (title, color) = announcement_style(payload.kind);
    let embed = CreateEmbed::new()
        .title(title)
        .description(&payload.content)
        .color(color);

    let message = CreateMessage::new().embed(embed);
    if payload.mention_everyone {
        message
            .content("@everyone")
            .allowed_mentions(CreateAllowedMentions::new().everyone(true))
    } else {
        message.allowed_mentions(CreateAllowedMentions::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::setup_request::EmbedFieldPayload;

    #[test]
    fn custom_embed_keeps_fields_in_order() {
        let payload = EmbedPayload {
            title: Some("Patch notes".to_string()),
            color: Some(0xFF0000),
            fields: vec![
                EmbedFieldPayload {
                    name: "Added".to_string(),
                    value: "Tickets".to_string(),
                    inline: true,
                },
                EmbedFieldPayload {
                    name: "Fixed".to_string(),
                    value: "Giveaways".to_string(),
                    inline: false,
                },
            ],
            ..Default::default()
        };

        let json = serde_json::to_value(custom_embed(&payload)).unwrap();

        assert_eq!(json["title"], "Patch notes");
        assert_eq!(json["color"], 0xFF0000);
        assert_eq!(json["fields"][1]["name"], "Fixed");
    }

    #[test]
    fn custom_embed_defaults_color() {
        let json = serde_json::to_value(custom_embed(&EmbedPayload::default())).unwrap();

        assert_eq!(json["color"], EMBED_COLOR);
        assert!(json["title"].is_null());
    }

    #[test]
    fn announcement_mentions_everyone_only_when_flagged() {
        let mut payload = AnnouncementPayload {
            channel_id: "1".to_string(),
            content: "Server maintenance tonight".to_string(),
            kind: AnnouncementKind::Important,
            mention_everyone: false,
        };

        let quiet = serde_json::to_value(announcement(&payload)).unwrap();
        assert!(quiet["content"].is_null());
        assert_eq!(quiet["embeds"][0]["title"], "⚠️ Important Announcement");

        payload.mention_everyone = true;
        let loud = serde_json::to_value(announcement(&payload)).unwrap();
        assert_eq!(loud["content"], "@everyone");
    }
}
