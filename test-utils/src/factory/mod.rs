//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*`
//! convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let request = factory::setup_request::create_setup_request(&db, "123").await?;
//!
//! let giveaway = factory::giveaway::GiveawayFactory::new(&db)
//!     .guild_id("123")
//!     .prize("Nitro")
//!     .ended(true)
//!     .build()
//!     .await?;
//! ```

pub mod custom_command;
pub mod dashboard_session;
pub mod economy_account;
pub mod giveaway;
pub mod guild_config;
pub mod helpers;
pub mod member_level;
pub mod setup_request;
pub mod ticket;

pub use helpers::next_id;
