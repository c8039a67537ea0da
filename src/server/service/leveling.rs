use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::leveling::LevelingRepository,
    error::AppError,
    model::leveling::{
        level_for_xp, LevelRole, MemberLevel, XpAward, XP_COOLDOWN_SECONDS, XP_PER_MESSAGE_MAX,
        XP_PER_MESSAGE_MIN,
    },
};

pub struct LevelingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LevelingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Awards message XP to a member, at most once per cooldown window.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the message was sent in
    /// - `user_id` - Author of the message
    /// - `now` - Message time, compared with the member's last award
    /// - `rng` - Source for the 15..=25 XP roll
    ///
    /// # Returns
    /// - `Ok(XpAward::Cooldown)` - Member already earned XP in the last minute
    /// - `Ok(XpAward::Gained)` - New member state and whether the level increased
    /// - `Err(AppError)` - Database error
    pub async fn record_message<R: Rng + ?Sized>(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<XpAward, AppError> {
        let repo = LevelingRepository::new(self.db);

        let member = repo.get_member(guild_id, user_id).await?;
        if let Some(member) = &member {
            if now - member.last_message_at < Duration::seconds(XP_COOLDOWN_SECONDS) {
                return Ok(XpAward::Cooldown);
            }
        }

        let previous_level = member.as_ref().map(|member| member.level).unwrap_or(0);
        let xp = member.map(|member| member.xp).unwrap_or(0)
            + rng.random_range(XP_PER_MESSAGE_MIN..=XP_PER_MESSAGE_MAX);
        let (level, _) = level_for_xp(xp);

        let member = repo
            .save_member(MemberLevel {
                guild_id,
                user_id,
                xp,
                level,
                last_message_at: now,
            })
            .await?;

        Ok(XpAward::Gained {
            member,
            leveled_up: level > previous_level,
        })
    }

    /// Reward roles a member at `level` should hold.
    pub async fn rewards_for(&self, guild_id: u64, level: i32) -> Result<Vec<LevelRole>, AppError> {
        LevelingRepository::new(self.db)
            .level_roles_between(guild_id, 0, level)
            .await
    }

    pub async fn level_roles(&self, guild_id: u64) -> Result<Vec<LevelRole>, AppError> {
        LevelingRepository::new(self.db).level_roles(guild_id).await
    }

    /// A member's stored progress together with their leaderboard position.
    pub async fn rank(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<(MemberLevel, u64)>, AppError> {
        let repo = LevelingRepository::new(self.db);

        let Some(member) = repo.get_member(guild_id, user_id).await? else {
            return Ok(None);
        };
        let position = repo.rank(guild_id, member.xp).await?;

        Ok(Some((member, position)))
    }

    /// Maps a level to an existing role, as done from the dashboard.
    pub async fn set_level_role(
        &self,
        guild_id: u64,
        level: i32,
        role_id: u64,
    ) -> Result<LevelRole, AppError> {
        if level < 1 {
            return Err(AppError::BadRequest("Level must be at least 1".to_string()));
        }

        LevelingRepository::new(self.db)
            .set_level_role(guild_id, level, role_id)
            .await
    }
}
