use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LevelRole::Table)
                    .if_not_exists()
                    .col(pk_auto(LevelRole::Id))
                    .col(string(LevelRole::GuildId))
                    .col(integer(LevelRole::Level))
                    .col(string(LevelRole::RoleId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_level_role_guild_level")
                    .table(LevelRole::Table)
                    .col(LevelRole::GuildId)
                    .col(LevelRole::Level)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_level_role_guild_level")
                    .table(LevelRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LevelRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LevelRole {
    Table,
    Id,
    GuildId,
    Level,
    RoleId,
}
