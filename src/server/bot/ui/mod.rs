//! Embeds and components the bot posts.
//!
//! Builders here are pure: they turn domain models into serenity builders and never
//! touch the network, so both interaction handlers and background services share them.
//! Component custom ids are the contract between a posted message and the handler that
//! answers clicks on it, long after the process that posted it may have restarted.

pub mod admin;
pub mod embed;
pub mod giveaway;
pub mod leveling;
pub mod rules;
pub mod ticket;
pub mod verify;

/// Default accent for bot embeds.
pub const EMBED_COLOR: u32 = 0x22C55E;
/// Accent for rules embeds.
pub const RULES_ACCENT_COLOR: u32 = 0x9C66FF;
pub const EMBED_THUMBNAIL: &str =
    "https://cdn.discordapp.com/embed/avatars/0.png";

pub const RULES_SELECT: &str = "rules-select";
pub const RULES_SETUP_TEXTS: &str = "rules-setup-texts";
pub const RULES_SETUP_BULK: &str = "rules-setup-bulk";
pub const RULES_SETUP_BANNER: &str = "rules-setup-banner";
pub const RULES_SETUP_CLEAR_BANNER: &str = "rules-setup-clear-banner";
pub const RULES_SETUP_FOOTER: &str = "rules-setup-footer";
pub const RULES_TEXTS_MODAL: &str = "rules-texts-modal";
pub const RULES_BULK_MODAL: &str = "rules-bulk-modal";
pub const RULES_BANNER_MODAL: &str = "rules-banner-modal";
pub const RULES_FOOTER_MODAL: &str = "rules-footer-modal";

pub const VERIFY_ACCEPT: &str = "verify-accept";
pub const VERIFY_SETUP_MODAL: &str = "verify-setup-modal";

pub const TICKET_SELECT: &str = "ticket-select";
pub const TICKET_CLOSE: &str = "ticket-close";

pub const GIVEAWAY_ENTER: &str = "giveaway-enter";
