//! Error types for Aura
//!
//! Errors below the repository are typed (`ClientError`). The repository
//! folds them into `Outcome::Failure`, so screens never see these directly.
//! `AuraError` is what the application boundary (the CLI) reports.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuraError>;

#[derive(Error, Debug)]
pub enum AuraError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{screen} failed: {message}")]
    ScreenFailed { screen: String, message: String },
}

impl AuraError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AuraError::InvalidInput(_) => 3,
            AuraError::ScreenFailed { .. } => 2,
            AuraError::Client(_) => 1,
            AuraError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Failures raised by a transport call
///
/// Non-2xx statuses are not errors: they come back as an unsuccessful
/// `ApiResponse`. These variants cover the cases where no usable response
/// exists at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Client setup failed: {0}")]
    Setup(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
