pub mod prelude;

pub mod custom_command;
pub mod dashboard_session;
pub mod economy_account;
pub mod giveaway;
pub mod giveaway_entry;
pub mod guild_config;
pub mod level_role;
pub mod member_level;
pub mod moderation_warning;
pub mod pending_setup_request;
pub mod ticket;
