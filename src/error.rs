//! Error types for definition validation, loading, and rendering

use thiserror::Error;

/// Result type for operations that touch the outside world (loading, writing)
pub type Result<T> = std::result::Result<T, SpecError>;

/// A structural rule of the proto3 format was violated.
///
/// Validation and rendering share this single error: a failed render never
/// yields partial text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable description of the failed invariant
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors surfaced by the loader and the CLI
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Invalid definition: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported definition format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{first} and {second} both render to {output}")]
    OutputCollision {
        output: String,
        first: String,
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("Message name cannot be empty");
        assert_eq!(err.to_string(), "Message name cannot be empty");
        assert_eq!(err.message(), "Message name cannot be empty");
    }

    #[test]
    fn test_spec_error_wraps_validation() {
        let err: SpecError = ValidationError::new("Enum must have a non-empty name").into();
        assert_eq!(err.to_string(), "Invalid definition: Enum must have a non-empty name");
    }
}
