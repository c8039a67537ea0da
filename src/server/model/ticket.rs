//! Support tickets opened from the ticket panel.

use chrono::{DateTime, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

/// Messages captured in a transcript.
pub const TRANSCRIPT_LIMIT: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub user_id: u64,
    pub topic: TicketTopic,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            topic: TicketTopic::from_value(&entity.topic).unwrap_or(TicketTopic::Other),
            closed: entity.closed,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketTopic {
    Support,
    Report,
    Other,
}

impl TicketTopic {
    pub const ALL: [TicketTopic; 3] = [Self::Support, Self::Report, Self::Other];

    pub fn value(&self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Report => "report",
            Self::Other => "other",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.value() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Support => "Support",
            Self::Report => "Report",
            Self::Other => "Other",
        }
    }

    pub fn emoji(&self) -> char {
        match self {
            Self::Support => '🛠',
            Self::Report => '🚨',
            Self::Other => '💬',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Support => "Get help from the team",
            Self::Report => "Report a member or an issue",
            Self::Other => "Anything else",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub user_id: u64,
    pub topic: TicketTopic,
}

/// Channel name for a new ticket, lowercase with only `a-z0-9-`.
pub fn channel_name(topic: TicketTopic, username: &str) -> String {
    let user: String = username
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(20)
        .collect();

    if user.is_empty() {
        format!("{}-ticket", topic.value())
    } else {
        format!("{}-{}", topic.value(), user)
    }
}

/// One captured message.
pub struct TranscriptLine {
    pub at: DateTime<Utc>,
    pub author: String,
    pub content: String,
}

/// Renders lines oldest first as `[YYYY-MM-DD HH:MM] author: content`.
pub fn format_transcript(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "[{}] {}: {}",
                line.at.format("%Y-%m-%d %H:%M"),
                line.author,
                line.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn channel_name_is_discord_safe() {
        assert_eq!(channel_name(TicketTopic::Report, "Some User!"), "report-someuser");
        assert_eq!(channel_name(TicketTopic::Support, "✨✨"), "support-ticket");
    }

    #[test]
    fn topic_values_round_trip() {
        for topic in TicketTopic::ALL {
            assert_eq!(TicketTopic::from_value(topic.value()), Some(topic));
        }
        assert_eq!(TicketTopic::from_value("nope"), None);
    }

    #[test]
    fn transcript_lines_are_timestamped() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let transcript = format_transcript(&[TranscriptLine {
            at,
            author: "alice".to_string(),
            content: "hi".to_string(),
        }]);

        assert_eq!(transcript, "[2026-01-02 03:04] alice: hi");
    }
}
