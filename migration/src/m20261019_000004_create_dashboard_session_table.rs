use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DashboardSession::Table)
                    .if_not_exists()
                    .col(pk_auto(DashboardSession::Id))
                    .col(string_uniq(DashboardSession::SessionId))
                    .col(string(DashboardSession::UserId))
                    .col(text(DashboardSession::AccessToken))
                    .col(text_null(DashboardSession::RefreshToken))
                    .col(timestamp(DashboardSession::ExpiresAt))
                    .col(timestamp(DashboardSession::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DashboardSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DashboardSession {
    Table,
    Id,
    SessionId,
    UserId,
    AccessToken,
    RefreshToken,
    ExpiresAt,
    CreatedAt,
}
