use sea_orm_migration::{prelude::*, schema::*};

use super::m20261019_000007_create_giveaway_table::Giveaway;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GiveawayEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(GiveawayEntry::Id))
                    .col(integer(GiveawayEntry::GiveawayId))
                    .col(string(GiveawayEntry::UserId))
                    .col(timestamp(GiveawayEntry::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_giveaway_entry_giveaway_id")
                            .from(GiveawayEntry::Table, GiveawayEntry::GiveawayId)
                            .to(Giveaway::Table, Giveaway::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_giveaway_entry_giveaway_user")
                    .table(GiveawayEntry::Table)
                    .col(GiveawayEntry::GiveawayId)
                    .col(GiveawayEntry::UserId)
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
                    .name("idx_giveaway_entry_giveaway_user")
                    .table(GiveawayEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GiveawayEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GiveawayEntry {
    Table,
    Id,
    GiveawayId,
    UserId,
    CreatedAt,
}
