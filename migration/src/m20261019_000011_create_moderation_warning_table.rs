use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationWarning::Table)
                    .if_not_exists()
                    .col(pk_auto(ModerationWarning::Id))
                    .col(string(ModerationWarning::GuildId))
                    .col(string(ModerationWarning::UserId))
                    .col(string(ModerationWarning::ModeratorId))
                    .col(text(ModerationWarning::Reason))
                    .col(timestamp(ModerationWarning::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModerationWarning::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ModerationWarning {
    Table,
    Id,
    GuildId,
    UserId,
    ModeratorId,
    Reason,
    CreatedAt,
}
