use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues indicating unexpected stored data or possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a snowflake id stored as a String
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },
}
