//! Per-guild coin balances.

use chrono::{DateTime, Duration, Utc};

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

pub const DAILY_REWARD: i64 = 200;
pub const DAILY_COOLDOWN_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct EconomyAccount {
    pub guild_id: u64,
    pub user_id: u64,
    pub balance: i64,
    pub last_daily_at: Option<DateTime<Utc>>,
}

impl EconomyAccount {
    pub fn from_entity(entity: entity::economy_account::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            balance: entity.balance,
            last_daily_at: entity.last_daily_at,
        })
    }

    /// Returns when the next daily reward unlocks, or `None` if it is available now.
    pub fn daily_available_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let next = self.last_daily_at? + Duration::hours(DAILY_COOLDOWN_HOURS);
        (next > now).then_some(next)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DailyOutcome {
    Claimed { balance: i64 },
    Cooldown { available_at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Sent { sender_balance: i64 },
    InsufficientFunds { balance: i64 },
    InvalidAmount,
    SelfTransfer,
}

/// Formats a remaining duration as `Xh Ym`.
pub fn format_remaining(remaining: Duration) -> String {
    let minutes = remaining.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(last_daily_at: Option<DateTime<Utc>>) -> EconomyAccount {
        EconomyAccount {
            guild_id: 1,
            user_id: 2,
            balance: 0,
            last_daily_at,
        }
    }

    #[test]
    fn daily_available_without_previous_claim() {
        assert_eq!(account(None).daily_available_at(Utc::now()), None);
    }

    #[test]
    fn daily_locked_within_cooldown() {
        let now = Utc::now();
        let claimed = now - Duration::hours(23);

        assert_eq!(
            account(Some(claimed)).daily_available_at(now),
            Some(claimed + Duration::hours(24))
        );
        assert_eq!(
            account(Some(now - Duration::hours(25))).daily_available_at(now),
            None
        );
    }

    #[test]
    fn formats_remaining_time() {
        assert_eq!(format_remaining(Duration::minutes(125)), "2h 5m");
    }
}
