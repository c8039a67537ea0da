use thiserror::Error;

use crate::server::error::template::TemplateError;

/// A pending setup request payload that cannot be interpreted.
#[derive(Error, Debug)]
pub enum SetupRequestError {
    #[error("Unknown setup type '{0}'")]
    UnknownType(String),

    #[error("Missing field '{0}' in setup request")]
    MissingField(&'static str),

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
