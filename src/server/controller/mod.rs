//! HTTP handlers for the dashboard API.
//!
//! Handlers authenticate through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! call into services or repositories, and convert domain models into DTOs. Every route
//! is annotated with `utoipa::path` and collected into the OpenAPI document by the router.

pub mod auth;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod pending;
pub mod role;
pub mod setup;
pub mod template;
