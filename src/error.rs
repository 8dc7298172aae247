//! Error types for loading documents and configuration
//!
//! Semantic violations are never errors: they are reported as
//! [`Diagnostic`](crate::walker::Diagnostic)s. These variants only cover the
//! host surface around the walker (reading files, parsing, config).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Validator host errors
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<ValidatorError>,
    },
}

impl ValidatorError {
    /// Attach the offending file path to an error
    pub fn at(self, path: impl Into<PathBuf>) -> Self {
        Self::Load {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
