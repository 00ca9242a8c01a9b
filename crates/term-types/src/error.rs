use thiserror::Error;

use crate::flags::FlagError;

#[derive(Error, Debug, Clone)]
pub enum TermError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TermError {
    fn from(e: serde_json::Error) -> Self {
        TermError::Serialization(e.to_string())
    }
}

/// Failure of a single command handler.
///
/// Never crosses the router boundary: the router renders it as one
/// output line and leaves the context untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error("{0}")]
    Invalid(String),
}
