use std::result::Result as StdResult;

use sales_config::ConfigError;
use sales_core::{CoreError, ValidationError};
use sales_domain::{DateRangeError, FilterError};
use thiserror::Error;

/// Unified error type for the domain, core, storage and config layers.
#[derive(Error, Debug)]
pub enum SalesError {
    #[error("Sale not found: #{0}")]
    SaleNotFound(u64),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SalesError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SalesError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for SalesError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SaleNotFound(id) => SalesError::SaleNotFound(id),
            CoreError::Validation(err) => SalesError::from(err),
            CoreError::InvalidOperation(message) => SalesError::InvalidInput(message),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                SalesError::StorageError(message)
            }
            CoreError::Io(err) => SalesError::StorageError(err.to_string()),
        }
    }
}

impl From<ValidationError> for SalesError {
    fn from(err: ValidationError) -> Self {
        SalesError::Validation(err.to_string())
    }
}

impl From<DateRangeError> for SalesError {
    fn from(err: DateRangeError) -> Self {
        SalesError::InvalidInput(err.to_string())
    }
}

impl From<FilterError> for SalesError {
    fn from(err: FilterError) -> Self {
        SalesError::InvalidInput(err.to_string())
    }
}

impl From<ConfigError> for SalesError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => SalesError::StorageError(io.to_string()),
            ConfigError::Serde(message) => SalesError::ConfigError(message),
            other @ (ConfigError::UnknownKey(_) | ConfigError::InvalidValue { .. }) => {
                SalesError::InvalidInput(other.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(SalesError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(SalesError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
