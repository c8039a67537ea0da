use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EconomyAccount::Table)
                    .if_not_exists()
                    .col(pk_auto(EconomyAccount::Id))
                    .col(string(EconomyAccount::GuildId))
                    .col(string(EconomyAccount::UserId))
                    .col(big_integer(EconomyAccount::Balance).default(0))
                    .col(timestamp_null(EconomyAccount::LastDailyAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_economy_account_guild_user")
                    .table(EconomyAccount::Table)
                    .col(EconomyAccount::GuildId)
                    .col(EconomyAccount::UserId)
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
                    .name("idx_economy_account_guild_user")
                    .table(EconomyAccount::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EconomyAccount::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EconomyAccount {
    Table,
    Id,
    GuildId,
    UserId,
    Balance,
    LastDailyAt,
}
