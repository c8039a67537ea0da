use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Giveaway::Table)
                    .if_not_exists()
                    .col(pk_auto(Giveaway::Id))
                    .col(string(Giveaway::GuildId))
                    .col(string(Giveaway::ChannelId))
                    .col(string_null(Giveaway::MessageId))
                    .col(string(Giveaway::Prize))
                    .col(text_null(Giveaway::Description))
                    .col(integer(Giveaway::WinnerCount).default(1))
                    .col(string(Giveaway::HostId))
                    .col(timestamp(Giveaway::EndsAt))
                    .col(boolean(Giveaway::Ended).default(false))
                    .col(timestamp(Giveaway::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Giveaway::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Giveaway {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    Prize,
    Description,
    WinnerCount,
    HostId,
    EndsAt,
    Ended,
    CreatedAt,
}
