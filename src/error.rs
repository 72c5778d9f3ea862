/// Centralized error types for smart-jump using thiserror
///
/// The classifier itself never fails; these cover configuration, rule
/// construction, document loading and the host command table.
use thiserror::Error;

/// Main error type for smart-jump
#[derive(Error, Debug)]
pub enum SmartJumpError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Command not registered: {0}")]
    CommandNotFound(String),

    #[error("Invalid definition pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to read document '{path}': {reason}")]
    DocumentReadFailed { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

// Conversion from anyhow::Error to SmartJumpError
impl From<anyhow::Error> for SmartJumpError {
    fn from(err: anyhow::Error) -> Self {
        SmartJumpError::Other(format!("{:#}", err))
    }
}

impl SmartJumpError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        SmartJumpError::Other(msg.into())
    }

    /// Check if this is a user error (bad config, unknown command, bad pattern) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SmartJumpError::CommandNotFound(_)
                | SmartJumpError::InvalidPattern { .. }
                | SmartJumpError::Config(ConfigError::InvalidValue { .. })
        )
    }
}
