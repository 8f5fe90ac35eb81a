//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// Required settings are missing; lists the variables to set.
    #[error("Missing required configuration: {}", .missing.join(", "))]
    Missing { missing: Vec<String> },

    /// A configuration file given explicitly does not exist.
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}
