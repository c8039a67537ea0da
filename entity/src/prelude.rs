pub use super::custom_command::Entity as CustomCommand;
pub use super::dashboard_session::Entity as DashboardSession;
pub use super::economy_account::Entity as EconomyAccount;
pub use super::giveaway::Entity as Giveaway;
pub use super::giveaway_entry::Entity as GiveawayEntry;
pub use super::guild_config::Entity as GuildConfig;
pub use super::level_role::Entity as LevelRole;
pub use super::member_level::Entity as MemberLevel;
pub use super::moderation_warning::Entity as ModerationWarning;
pub use super::pending_setup_request::Entity as PendingSetupRequest;
pub use super::ticket::Entity as Ticket;
