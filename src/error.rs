use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Scenario file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Scenario I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parsing error: {0}")]
    Parsing(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
