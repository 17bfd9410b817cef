//! Error types for Hanzo Privacy

use thiserror::Error;

/// Result type alias for privacy operations
pub type Result<T> = std::result::Result<T, PrivacyError>;

/// Privacy layer error types
///
/// Scrubbing and detection never fail at call time. Errors only surface
/// while building a rule set or generating a session identity.
#[derive(Debug, Error)]
pub enum PrivacyError {
    /// A redaction rule's pattern failed to compile
    #[error("Invalid redaction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The OS random source could not be read
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// TOML configuration could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
