use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingSetupRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(PendingSetupRequest::Id))
                    .col(string(PendingSetupRequest::GuildId))
                    .col(string(PendingSetupRequest::SetupType))
                    .col(text(PendingSetupRequest::Data))
                    .col(boolean(PendingSetupRequest::Processed).default(false))
                    .col(
                        timestamp(PendingSetupRequest::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The poller scans for unprocessed rows every few seconds
        manager
            .create_index(
                Index::create()
                    .name("idx_pending_setup_request_processed")
                    .table(PendingSetupRequest::Table)
                    .col(PendingSetupRequest::Processed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pending_setup_request_processed")
                    .table(PendingSetupRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PendingSetupRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PendingSetupRequest {
    Table,
    Id,
    GuildId,
    SetupType,
    Data,
    Processed,
    CreatedAt,
}
