//! Coin balances per guild member.
//!
//! Accounts are created lazily with a zero balance the first time a member touches the
//! economy. Transfers run in a transaction so both balances move together.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::economy::{DailyOutcome, EconomyAccount, TransferOutcome, DAILY_REWARD},
};

const DAILY_CLAIM_ATTEMPTS: usize = 3;

pub struct EconomyRepository<'a> {
    db: &'a DatabaseConnection,
}

async fn find_or_create<C: ConnectionTrait>(
    conn: &C,
    guild_id: u64,
    user_id: u64,
) -> Result<entity::economy_account::Model, AppError> {
    let existing = entity::prelude::EconomyAccount::find()
        .filter(entity::economy_account::Column::GuildId.eq(guild_id.to_string()))
        .filter(entity::economy_account::Column::UserId.eq(user_id.to_string()))
        .one(conn)
        .await?;

    if let Some(existing) = existing {
        return Ok(existing);
    }

    Ok(entity::economy_account::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        balance: ActiveValue::Set(0),
        last_daily_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await?)
}

async fn set_balance<C: ConnectionTrait>(
    conn: &C,
    account: entity::economy_account::Model,
    balance: i64,
) -> Result<entity::economy_account::Model, AppError> {
    let mut active: entity::economy_account::ActiveModel = account.into();
    active.balance = ActiveValue::Set(balance);
    Ok(active.update(conn).await?)
}

impl<'a> EconomyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a member's account, opening one with a zero balance on first use.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `user_id`: Discord user ID
    ///
    /// # Returns
    /// - `Ok(EconomyAccount)`: Existing or newly created account
    /// - `Err(AppError)`: Database error
    pub async fn get_or_create(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<EconomyAccount, AppError> {
        EconomyAccount::from_entity(find_or_create(self.db, guild_id, user_id).await?)
    }

    /// Pays the daily reward if the 24 hour cooldown has elapsed.
    ///
    /// The write only matches the row as it was read, so two claims racing on the same
    /// snapshot pay out once. A balance moved by a concurrent transfer is re-read and
    /// the claim tried again.
    ///
    /// # Returns
    /// - `Ok(DailyOutcome::Claimed)`: Reward added, with the new balance
    /// - `Ok(DailyOutcome::Cooldown)`: Already claimed, with the unlock time
    /// - `Err(AppError)`: Database error, or the row kept changing under the claim
    pub async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DailyOutcome, AppError> {
        for _ in 0..DAILY_CLAIM_ATTEMPTS {
            let entity = find_or_create(self.db, guild_id, user_id).await?;
            let account = EconomyAccount::from_entity(entity.clone())?;

            if let Some(available_at) = account.daily_available_at(now) {
                return Ok(DailyOutcome::Cooldown { available_at });
            }

            let balance = account.balance + DAILY_REWARD;
            let last_daily = match entity.last_daily_at {
                Some(at) => entity::economy_account::Column::LastDailyAt.eq(at),
                None => entity::economy_account::Column::LastDailyAt.is_null(),
            };

            let result = entity::prelude::EconomyAccount::update_many()
                .col_expr(entity::economy_account::Column::Balance, Expr::value(balance))
                .col_expr(
                    entity::economy_account::Column::LastDailyAt,
                    Expr::value(Some(now)),
                )
                .filter(entity::economy_account::Column::Id.eq(entity.id))
                .filter(entity::economy_account::Column::Balance.eq(entity.balance))
                .filter(last_daily)
                .exec(self.db)
                .await?;

            if result.rows_affected > 0 {
                return Ok(DailyOutcome::Claimed { balance });
            }
        }

        Err(AppError::InternalError(format!(
            "Daily claim for user {} in guild {} kept conflicting",
            user_id, guild_id
        )))
    }

    /// Moves coins between two members of the same guild.
    ///
    /// # Returns
    /// - `Ok(TransferOutcome::Sent)`: Both balances updated
    /// - `Ok(TransferOutcome::InvalidAmount)`: Amount was zero or negative
    /// - `Ok(TransferOutcome::SelfTransfer)`: Sender and recipient are the same
    /// - `Ok(TransferOutcome::InsufficientFunds)`: Sender balance too low, nothing changed
    /// - `Err(AppError)`: Database error, the transaction is rolled back
    pub async fn transfer(
        &self,
        guild_id: u64,
        from_user_id: u64,
        to_user_id: u64,
        amount: i64,
    ) -> Result<TransferOutcome, AppError> {
        if amount <= 0 {
            return Ok(TransferOutcome::InvalidAmount);
        }
        if from_user_id == to_user_id {
            return Ok(TransferOutcome::SelfTransfer);
        }

        let txn = self.db.begin().await?;

        let sender = find_or_create(&txn, guild_id, from_user_id).await?;
        if sender.balance < amount {
            let balance = sender.balance;
            txn.rollback().await?;
            return Ok(TransferOutcome::InsufficientFunds { balance });
        }

        let recipient = find_or_create(&txn, guild_id, to_user_id).await?;
        let sender_balance = sender.balance - amount;
        let recipient_balance = recipient.balance + amount;

        set_balance(&txn, sender, sender_balance).await?;
        set_balance(&txn, recipient, recipient_balance).await?;

        txn.commit().await?;

        Ok(TransferOutcome::Sent { sender_balance })
    }

    /// Gets the richest accounts in a guild.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `limit`: Maximum number of accounts
    ///
    /// # Returns
    /// - `Ok(Vec<EconomyAccount>)`: Accounts by balance, highest first
    /// - `Err(AppError)`: Database error
    pub async fn richest(&self, guild_id: u64, limit: u64) -> Result<Vec<EconomyAccount>, AppError> {
        entity::prelude::EconomyAccount::find()
            .filter(entity::economy_account::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::economy_account::Column::Balance)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(EconomyAccount::from_entity)
            .collect()
    }
}
