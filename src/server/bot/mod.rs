//! Discord bot: gateway events, slash commands and interactive components.
//!
//! The bot runs as its own binary. Event handlers live in `handler`, slash commands and
//! the component and modal callbacks they spawn live in `command`, and every embed or
//! component the bot posts is built in `ui`. Once the gateway cache is ready the bot
//! starts its background jobs: the setup queue poller and the giveaway finisher.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability and joins
//! - `GUILD_MESSAGES` - Messages for the verification gate, custom commands and XP
//! - `GUILD_MEMBERS` - Member joins for the unverified role (privileged intent)
//! - `MESSAGE_CONTENT` - Reading custom command prefixes (privileged intent)

pub mod command;
pub mod handler;
pub mod start;
pub mod ui;
