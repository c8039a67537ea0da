//! Ticket panel, ticket welcome and transcript messages.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateAttachment, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, ReactionType,
};

use crate::server::model::ticket::{Ticket, TicketTopic};

use super::{EMBED_COLOR, TICKET_CLOSE, TICKET_SELECT};

pub fn ticket_panel() -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("🎫 Support Tickets")
        .description(
            "Need help? Pick a topic below and a private channel will be opened for you and the staff team.",
        )
        .color(EMBED_COLOR);

    let options = TicketTopic::ALL
        .into_iter()
        .map(|topic| {
            CreateSelectMenuOption::new(topic.label(), topic.value())
                .emoji(ReactionType::Unicode(topic.emoji().to_string()))
                .description(topic.description())
        })
        .collect();

    let menu = CreateSelectMenu::new(TICKET_SELECT, CreateSelectMenuKind::String { options })
        .placeholder("Choose a ticket topic")
        .min_values(1)
        .max_values(1);

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::SelectMenu(menu)])
}

/// First message inside a freshly opened ticket channel.
pub fn ticket_welcome(user_id: u64, topic: TicketTopic) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title(format!("{} {} ticket", topic.emoji(), topic.label()))
        .description(format!(
            "Hi <@{}>, thanks for reaching out. Describe your issue and a staff member will be with you shortly.",
            user_id
        ))
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new("Press Close Ticket once you are done"));

    CreateMessage::new()
        .content(format!("<@{}>", user_id))
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
            TICKET_CLOSE,
        )
        .label("Close Ticket")
        .emoji('🔒')
        .style(ButtonStyle::Danger)])])
}

/// Transcript posted to the log channel, with the full text attached.
pub fn transcript_message(ticket: &Ticket, closed_by: u64, transcript: String) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("Ticket Transcript")
        .field("Opened by", format!("<@{}>", ticket.user_id), true)
        .field("Closed by", format!("<@{}>", closed_by), true)
        .field("Topic", ticket.topic.label(), true)
        .color(EMBED_COLOR);

    let filename = format!("ticket-{}.txt", ticket.id);

    CreateMessage::new()
        .embed(embed)
        .add_file(CreateAttachment::bytes(transcript.into_bytes(), filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_offers_every_topic() {
        let json = serde_json::to_value(ticket_panel()).unwrap();

        let menu = &json["components"][0]["components"][0];
        assert_eq!(menu["custom_id"], TICKET_SELECT);
        let options = menu["options"].as_array().unwrap();
        assert_eq!(options.len(), TicketTopic::ALL.len());
        assert_eq!(options[1]["value"], "report");
    }

    #[test]
    fn welcome_has_close_button() {
        let json = serde_json::to_value(ticket_welcome(7, TicketTopic::Support)).unwrap();

        assert_eq!(json["content"], "<@7>");
        assert_eq!(json["components"][0]["components"][0]["custom_id"], TICKET_CLOSE);
    }
}
