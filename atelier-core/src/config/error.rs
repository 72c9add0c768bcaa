//! Configuration error types

use thiserror::Error;

/// Errors raised while building or validating client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("environment variable '{var}' is invalid: {message}")]
    InvalidEnvVar { var: String, message: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
