//! JSON data transfer objects exchanged with dashboard clients.

pub mod api;
pub mod command;
pub mod guild;
pub mod role;
pub mod setup;
pub mod template;
pub mod user;
