//! Common error types for HCAL

use thiserror::Error;

/// Common result type for HCAL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across HCAL services
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Library data failed to parse or validate
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
