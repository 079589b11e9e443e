//! Error types for the cache adapter
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache adapter.
///
/// Engine failures are never errors; they surface as `false` results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty or contains a reserved character
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A typed value could not be converted to or from JSON
    #[error("Codec error: {0}")]
    Codec(String),

    /// A duration string is not a valid ISO-8601 interval
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// A configuration value is not recognised
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A command line could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Codec(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache adapter.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::InvalidKey("Key should not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid key: Key should not be empty");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = CacheError::InvalidConfig("unknown false policy 'drop'".to_string());
        assert_eq!(err.to_string(), "Invalid config: unknown false policy 'drop'");
    }

    #[test]
    fn test_codec_error_from_serde() {
        let err = serde_json::from_str::<u8>("not json").unwrap_err();
        let converted: CacheError = err.into();
        assert!(matches!(converted, CacheError::Codec(_)));
    }
}
