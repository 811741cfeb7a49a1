//! Error types for the nudyn CLI.

use nudyn_core::{ConfigError, MomentsError};
use thiserror::Error;

use crate::config::ConfigFileError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment error
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigFileError),

    /// Generator or run parameters rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Moments could not be finalised
    #[error("Moments error: {0}")]
    Moments(#[from] MomentsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::from(ConfigError::InvalidKaonFraction(1.5));
        assert!(err.to_string().starts_with("Invalid configuration"));
        assert!(err.to_string().contains("1.5"));

        let err = CliError::from(MomentsError::InsufficientData { n_events: 1 });
        assert!(err.to_string().contains("Moments error"));
    }
}
