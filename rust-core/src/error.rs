//! Error types for shake sensing.
//!
//! The filter itself has no failure modes. Errors only arise at the edges:
//! loading configuration and reading recorded sample streams.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShakeError>;

#[derive(Error, Debug)]
pub enum ShakeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Line {line}: timestamp {timestamp_ms} is before previous sample at {previous_ms}")]
    OutOfOrder {
        line: usize,
        previous_ms: u64,
        timestamp_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "threshold",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for threshold: must be positive");
    }

    #[test]
    fn test_wraps_into_shake_error() {
        let err: ShakeError = ReplayError::Malformed {
            line: 3,
            reason: "expected 4 fields".to_string(),
        }
        .into();
        assert!(matches!(err, ShakeError::Replay(_)));
        assert_eq!(err.to_string(), "Replay error: Line 3: expected 4 fields");
    }
}
