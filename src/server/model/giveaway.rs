//! Giveaway models and winner selection.

use chrono::{DateTime, Utc};
use rand::{seq::IndexedRandom, Rng};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

#[derive(Debug, Clone, PartialEq)]
pub struct Giveaway {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: Option<u64>,
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: u32,
    pub host_id: u64,
    pub ends_at: DateTime<Utc>,
    pub ended: bool,
}

impl Giveaway {
    pub fn from_entity(entity: entity::giveaway::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            message_id: entity.message_id.map(parse_u64_from_string).transpose()?,
            prize: entity.prize,
            description: entity.description,
            winner_count: entity.winner_count.max(1) as u32,
            host_id: parse_u64_from_string(entity.host_id)?,
            ends_at: entity.ends_at,
            ended: entity.ended,
        })
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.ended && self.ends_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct CreateGiveawayParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: u32,
    pub host_id: u64,
    pub ends_at: DateTime<Utc>,
}

/// Whether a button press added or removed the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryToggle {
    Entered,
    Left,
}

/// Picks up to `count` distinct entrants uniformly at random.
pub fn draw_winners<R: Rng + ?Sized>(entrants: &[u64], count: usize, rng: &mut R) -> Vec<u64> {
    entrants.choose_multiple(rng, count).copied().collect()
}

/// Mentions joined for the announcement, or `None` when nobody entered.
pub fn format_winners(winners: &[u64]) -> Option<String> {
    if winners.is_empty() {
        return None;
    }

    Some(
        winners
            .iter()
            .map(|id| format!("<@{}>", id))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn draws_distinct_winners_capped_by_entrants() {
        let mut rng = rand::rng();
        let entrants = [1, 2, 3];

        let winners = draw_winners(&entrants, 5, &mut rng);

        assert_eq!(winners.len(), 3);
        assert_eq!(winners.iter().collect::<HashSet<_>>().len(), 3);
    }

    #[test]
    fn draw_from_empty_pool_is_empty() {
        let mut rng = rand::rng();
        assert!(draw_winners(&[], 1, &mut rng).is_empty());
        assert_eq!(format_winners(&[]), None);
    }

    #[test]
    fn formats_mentions() {
        assert_eq!(format_winners(&[1, 2]).as_deref(), Some("<@1>, <@2>"));
    }
}
