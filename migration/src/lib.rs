pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_guild_config_table;
mod m20261019_000002_create_pending_setup_request_table;
mod m20261019_000003_create_custom_command_table;
mod m20261019_000004_create_dashboard_session_table;
mod m20261019_000005_create_level_role_table;
mod m20261019_000006_create_member_level_table;
mod m20261019_000007_create_giveaway_table;
mod m20261019_000008_create_giveaway_entry_table;
mod m20261019_000009_create_ticket_table;
mod m20261019_000010_create_economy_account_table;
mod m20261019_000011_create_moderation_warning_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_guild_config_table::Migration),
            Box::new(m20261019_000002_create_pending_setup_request_table::Migration),
            Box::new(m20261019_000003_create_custom_command_table::Migration),
            Box::new(m20261019_000004_create_dashboard_session_table::Migration),
            Box::new(m20261019_000005_create_level_role_table::Migration),
            Box::new(m20261019_000006_create_member_level_table::Migration),
            Box::new(m20261019_000007_create_giveaway_table::Migration),
            Box::new(m20261019_000008_create_giveaway_entry_table::Migration),
            Box::new(m20261019_000009_create_ticket_table::Migration),
            Box::new(m20261019_000010_create_economy_account_table::Migration),
            Box::new(m20261019_000011_create_moderation_warning_table::Migration),
        ]
    }
}
