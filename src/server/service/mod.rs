//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Handling complex multi-step operations

pub mod auth;
pub mod bot_presence;
pub mod custom_command;
pub mod discord_api;
pub mod giveaway;
pub mod giveaway_message;
pub mod leveling;
pub mod setup_executor;
pub mod setup_queue;
pub mod template;
