//! Core error types for Breachwatch.
//!
//! Errors raised by the shared types and configuration layer. Crates further
//! up the stack wrap [`BreachwatchError`] in their own error enums.

use thiserror::Error;

/// Central error type for core operations.
#[derive(Error, Debug)]
pub enum BreachwatchError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A field name that is not part of the breach record
    #[error("unknown breach field: '{name}'")]
    UnknownField {
        /// The name as supplied (field names are case-sensitive)
        name: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `BreachwatchError`.
pub type Result<T> = std::result::Result<T, BreachwatchError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BreachwatchError::UnknownField {
            name: "pwncount".to_string(),
        };
        assert_eq!(err.to_string(), "unknown breach field: 'pwncount'");

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: BreachwatchError = config_err.into();
        assert!(matches!(err, BreachwatchError::Config(_)));
    }
}
