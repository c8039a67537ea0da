//! Channel Manager Test Utils
//!
//! Shared testing utilities for the bot and dashboard crates. Provides a builder for
//! in-memory SQLite test databases, a lazily created tower-sessions `Session`, entity
//! factories with sensible defaults, and serenity model fixtures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::PendingSetupRequest;
//!
//! #[tokio::test]
//! async fn enqueues_request() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(PendingSetupRequest)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
