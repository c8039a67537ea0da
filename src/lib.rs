//! Discord channel manager: a Serenity bot plus a JSON dashboard sharing one database.
//!
//! The two binaries in `src/bin` wire the pieces together; everything they run lives here.

pub mod model;
pub mod server;
