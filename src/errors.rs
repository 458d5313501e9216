use thiserror::Error;

use crate::schedule::DateWindowError;

/// Error type that captures failures outside the pure scheduling functions.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BalanceError>;

impl From<DateWindowError> for BalanceError {
    fn from(err: DateWindowError) -> Self {
        BalanceError::InvalidInput(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BalanceError),
    #[error("Invalid input: {0}")]
    Input(String),
}
