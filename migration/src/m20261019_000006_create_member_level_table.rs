use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberLevel::Table)
                    .if_not_exists()
                    .col(pk_auto(MemberLevel::Id))
                    .col(string(MemberLevel::GuildId))
                    .col(string(MemberLevel::UserId))
                    .col(big_integer(MemberLevel::Xp).default(0))
                    .col(integer(MemberLevel::Level).default(0))
                    .col(timestamp(MemberLevel::LastMessageAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_level_guild_user")
                    .table(MemberLevel::Table)
                    .col(MemberLevel::GuildId)
                    .col(MemberLevel::UserId)
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
                    .name("idx_member_level_guild_user")
                    .table(MemberLevel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MemberLevel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MemberLevel {
    Table,
    Id,
    GuildId,
    UserId,
    Xp,
    Level,
    LastMessageAt,
}
