//! Serenity model fixtures.
//!
//! Builds serenity structs by deserializing JSON shaped like Discord API payloads.

pub mod role;

pub use role::{create_managed_role, create_test_role};
