use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::GuildId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string(Ticket::UserId))
                    .col(string(Ticket::Topic))
                    .col(boolean(Ticket::Closed).default(false))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp_null(Ticket::ClosedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    Id,
    GuildId,
    ChannelId,
    UserId,
    Topic,
    Closed,
    CreatedAt,
    ClosedAt,
}
