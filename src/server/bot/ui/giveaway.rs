//! Giveaway embeds.
//!
//! A running giveaway shows its prize, end time and entry count with an "Enter" button.
//! Once drawn, the same message is edited into the ended form without components and a
//! separate announcement names the winners.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage,
    EditMessage,
};

use crate::server::model::giveaway::{format_winners, Giveaway};

use super::GIVEAWAY_ENTER;

const GIVEAWAY_COLOR: u32 = 0xF1C40F;
const ENDED_COLOR: u32 = 0x95A5A6;

fn description(giveaway: &Giveaway, body: String) -> String {
    match &giveaway.description {
        Some(text) if !text.trim().is_empty() => format!("{}\n\n{}", text, body),
        _ => body,
    }
}

pub fn giveaway_embed(giveaway: &Giveaway, entries: u64) -> CreateEmbed {
    let body = format!(
        "Ends <t:{}:R> (<t:{}:f>)\nHosted by <@{}>\nWinners: **{}**\nEntries: **{}**",
        giveaway.ends_at.timestamp(),
        giveaway.ends_at.timestamp(),
        giveaway.host_id,
        giveaway.winner_count,
        entries
    );

    CreateEmbed::new()
        .title(format!("🎉 {}", giveaway.prize))
        .description(description(giveaway, body))
        .color(GIVEAWAY_COLOR)
        .footer(CreateEmbedFooter::new("Press Enter to join, press again to leave"))
}

pub fn enter_button() -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(GIVEAWAY_ENTER)
        .label("Enter")
        .emoji('🎉')
        .style(ButtonStyle::Primary)])
}

/// Initial giveaway post.
pub fn giveaway_message(giveaway: &Giveaway) -> CreateMessage {
    CreateMessage::new()
        .embed(giveaway_embed(giveaway, 0))
        .components(vec![enter_button()])
}

/// Refreshes the entry count after a toggle.
pub fn entries_update(giveaway: &Giveaway, entries: u64) -> EditMessage {
    EditMessage::new()
        .embed(giveaway_embed(giveaway, entries))
        .components(vec![enter_button()])
}

pub fn ended_embed(giveaway: &Giveaway, winners: &[u64], entrant_count: usize) -> CreateEmbed {
    let body = format!(
        "Ended <t:{}:R>\nHosted by <@{}>\nWinners: {}\nEntries: **{}**",
        giveaway.ends_at.timestamp(),
        giveaway.host_id,
        format_winners(winners).unwrap_or_else(|| "No valid entries".to_string()),
        entrant_count
    );

    CreateEmbed::new()
        .title(format!("🎉 {} (ended)", giveaway.prize))
        .description(description(giveaway, body))
        .color(ENDED_COLOR)
}

/// Final edit of the giveaway post; the Enter button is removed.
pub fn ended_update(giveaway: &Giveaway, winners: &[u64], entrant_count: usize) -> EditMessage {
    EditMessage::new()
        .embed(ended_embed(giveaway, winners, entrant_count))
        .components(vec![])
}

pub fn winners_announcement(giveaway: &Giveaway, winners: &[u64]) -> CreateMessage {
    let content = match format_winners(winners) {
        Some(mentions) => format!(
            "🎉 Congratulations {}! You won **{}**!",
            mentions, giveaway.prize
        ),
        None => format!("No valid entries for **{}**, no winners drawn.", giveaway.prize),
    };

    CreateMessage::new().content(content)
}
