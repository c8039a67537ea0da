//! Session storage and authentication guards shared by the controllers.

pub mod auth;
pub mod session;
