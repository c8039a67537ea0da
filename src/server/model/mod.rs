//! Domain models and operation parameter types.
//!
//! Models here are independent of the HTTP layer. Entity models are converted at the
//! repository boundary via `from_entity`, and into DTOs at the controller boundary.

pub mod custom_command;
pub mod economy;
pub mod giveaway;
pub mod guild_config;
pub mod leveling;
pub mod moderation;
pub mod permission;
pub mod rules;
pub mod session;
pub mod setup_request;
pub mod template;
pub mod ticket;
pub mod verify;
