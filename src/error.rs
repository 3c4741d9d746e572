//! Error types for the tosspay library.

use thiserror::Error;

/// Result type alias for tosspay operations.
pub type Result<T> = std::result::Result<T, TossPayError>;

#[derive(Error, Debug)]
pub enum TossPayError {
    // ==================== Pre-flight Validation Errors ====================
    #[error("Order number '{0}' contains a disallowed character. Remove '&' before submitting.")]
    InvalidOrderNo(String),

    #[error("Requested expiry of {requested} seconds exceeds the gateway maximum of {max} seconds.")]
    ExpiredTimeTooLong { requested: u64, max: u64 },

    #[error("auto_execute requires a result_callback URL to deliver the payment result.")]
    NotAutoExecutable,

    // ==================== Configuration Errors ====================
    #[error("{0}")]
    ConfigMissing(String),

    #[error("{0}")]
    InvalidConfig(String),

    #[error("Could not find config directory. Ensure your home directory is accessible.")]
    NoConfigDir,

    // ==================== Gateway / Transport Errors ====================
    #[error("Unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file format: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to save config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network request failed: {0}")]
    Curl(#[from] curl::Error),

    #[error("Server returned invalid text encoding. The response may be corrupted.")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl TossPayError {
    /// Create an unexpected-response error
    pub fn unexpected_response(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Create a config missing error
    pub fn config_missing(msg: impl Into<String>) -> Self {
        Self::ConfigMissing(msg.into())
    }
}
