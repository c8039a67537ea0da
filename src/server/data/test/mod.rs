mod custom_command;
mod dashboard_session;
mod economy;
mod giveaway;
mod guild_config;
mod leveling;
mod moderation;
mod setup_request;
mod ticket;
