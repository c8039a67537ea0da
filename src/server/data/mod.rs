//! Database repository layer.
//!
//! Each repository borrows a `DatabaseConnection`, performs its queries with SeaORM
//! entities, and converts rows into domain models with `from_entity` so callers never
//! handle string encoded snowflakes. Both binaries share these repositories: the
//! dashboard produces setup requests and settings, the bot consumes them.

pub mod custom_command;
pub mod dashboard_session;
pub mod economy;
pub mod giveaway;
pub mod guild_config;
pub mod leveling;
pub mod moderation;
pub mod setup_request;
pub mod ticket;

#[cfg(test)]
mod test;
