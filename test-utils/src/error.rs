use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to the in-memory database or creating a table failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// A context accessor was used before the resource it returns was initialized.
    #[error("Test context is missing its {0}")]
    Uninitialized(&'static str),
}
