use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::leveling::{LevelRole, MemberLevel},
};

pub struct LevelingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LevelingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_member_entity(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<entity::member_level::Model>, AppError> {
        Ok(entity::prelude::MemberLevel::find()
            .filter(entity::member_level::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_level::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?)
    }

    /// Gets a member's XP state.
    ///
    /// # Returns
    /// - `Ok(Some(MemberLevel))`: Member has earned XP before
    /// - `Ok(None)`: No XP recorded yet
    /// - `Err(AppError)`: Database error
    pub async fn get_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<MemberLevel>, AppError> {
        self.find_member_entity(guild_id, user_id)
            .await?
            .map(MemberLevel::from_entity)
            .transpose()
    }

    /// Writes a member's XP, level and last message time.
    ///
    /// # Arguments
    /// - `member`: Full member state to store
    ///
    /// # Returns
    /// - `Ok(MemberLevel)`: The stored state
    /// - `Err(AppError)`: Database error
    pub async fn save_member(&self, member: MemberLevel) -> Result<MemberLevel, AppError> {
        let existing = self
            .find_member_entity(member.guild_id, member.user_id)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active: entity::member_level::ActiveModel = existing.into();
                active.xp = ActiveValue::Set(member.xp);
                active.level = ActiveValue::Set(member.level);
                active.last_message_at = ActiveValue::Set(member.last_message_at);
                active.update(self.db).await?
            }
            None => {
                entity::member_level::ActiveModel {
                    guild_id: ActiveValue::Set(member.guild_id.to_string()),
                    user_id: ActiveValue::Set(member.user_id.to_string()),
                    xp: ActiveValue::Set(member.xp),
                    level: ActiveValue::Set(member.level),
                    last_message_at: ActiveValue::Set(member.last_message_at),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        MemberLevel::from_entity(entity)
    }

    /// Gets the members with the most XP in a guild.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `limit`: Maximum number of members
    ///
    /// # Returns
    /// - `Ok(Vec<MemberLevel>)`: Members by XP, highest first
    /// - `Err(AppError)`: Database error
    pub async fn top(&self, guild_id: u64, limit: u64) -> Result<Vec<MemberLevel>, AppError> {
        entity::prelude::MemberLevel::find()
            .filter(entity::member_level::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::member_level::Column::Xp)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(MemberLevel::from_entity)
            .collect()
    }

    /// 1-based leaderboard position for a member with `xp` total XP.
    ///
    /// # Returns
    /// - `Ok(u64)`: One more than the number of members with more XP
    /// - `Err(AppError)`: Database error
    pub async fn rank(&self, guild_id: u64, xp: i64) -> Result<u64, AppError> {
        let ahead = entity::prelude::MemberLevel::find()
            .filter(entity::member_level::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_level::Column::Xp.gt(xp))
            .count(self.db)
            .await?;

        Ok(ahead + 1)
    }

    /// Assigns a reward role to a level, replacing any role already set for it.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `level`: Level that grants the role
    /// - `role_id`: Discord role ID
    ///
    /// # Returns
    /// - `Ok(LevelRole)`: The stored mapping
    /// - `Err(AppError)`: Database error
    pub async fn set_level_role(
        &self,
        guild_id: u64,
        level: i32,
        role_id: u64,
    ) -> Result<LevelRole, AppError> {
        let existing = entity::prelude::LevelRole::find()
            .filter(entity::level_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::level_role::Column::Level.eq(level))
            .one(self.db)
            .await?;

        let entity = if let Some(existing) = existing {
            let mut active: entity::level_role::ActiveModel = existing.into();
            active.role_id = ActiveValue::Set(role_id.to_string());
            active.update(self.db).await?
        } else {
            entity::level_role::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                level: ActiveValue::Set(level),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            }
            .insert(self.db)
            .await?
        };

        LevelRole::from_entity(entity)
    }

    /// Gets every reward role configured for a guild, lowest level first.
    ///
    /// # Returns
    /// - `Ok(Vec<LevelRole>)`: Level to role mappings
    /// - `Err(AppError)`: Database error
    pub async fn level_roles(&self, guild_id: u64) -> Result<Vec<LevelRole>, AppError> {
        entity::prelude::LevelRole::find()
            .filter(entity::level_role::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::level_role::Column::Level)
            .all(self.db)
            .await?
            .into_iter()
            .map(LevelRole::from_entity)
            .collect()
    }

    /// Gets reward roles for levels in `(from, to]`, the roles earned by a level up.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID
    /// - `from`: Level before the XP gain, excluded
    /// - `to`: Level after the XP gain, included
    ///
    /// # Returns
    /// - `Ok(Vec<LevelRole>)`: Roles to grant, lowest level first
    /// - `Err(AppError)`: Database error
    pub async fn level_roles_between(
        &self,
        guild_id: u64,
        from: i32,
        to: i32,
    ) -> Result<Vec<LevelRole>, AppError> {
        entity::prelude::LevelRole::find()
            .filter(entity::level_role::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::level_role::Column::Level.gt(from))
            .filter(entity::level_role::Column::Level.lte(to))
            .order_by_asc(entity::level_role::Column::Level)
            .all(self.db)
            .await?
            .into_iter()
            .map(LevelRole::from_entity)
            .collect()
    }
}
