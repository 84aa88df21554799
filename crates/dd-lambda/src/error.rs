//! Error types for the instrumentation layer.
//!
//! These cover failures of the library itself (metric serialization, writing
//! to the output sink, configuration). Errors returned by a wrapped handler
//! are never converted into this type.

use thiserror::Error;

/// Main error type for instrumentation operations
#[derive(Error, Debug)]
pub enum LambdaError {
    /// Metric record could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing a metric line to the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metric value cannot be represented as a JSON number
    #[error("Invalid metric value: {0}")]
    InvalidValue(String),

    /// Function ARN did not have the expected shape
    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LambdaError {
    /// Create an invalid ARN error
    pub fn invalid_arn(arn: impl Into<String>) -> Self {
        LambdaError::InvalidArn(arn.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LambdaError::Config(msg.into())
    }

    /// Create an invalid metric value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        LambdaError::InvalidValue(msg.into())
    }
}

/// Result type alias for instrumentation operations
pub type Result<T> = std::result::Result<T, LambdaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LambdaError::InvalidArn("not-an-arn".to_string());
        assert_eq!(err.to_string(), "Invalid ARN: not-an-arn");

        let err = LambdaError::config("bad level");
        assert_eq!(err.to_string(), "Configuration error: bad level");
    }

    #[test]
    fn test_error_constructors() {
        let err = LambdaError::invalid_value("NaN");
        assert!(matches!(err, LambdaError::InvalidValue(_)));
        assert_eq!(err.to_string(), "Invalid metric value: NaN");

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(matches!(LambdaError::from(io), LambdaError::Io(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LambdaError = err.into();
        assert!(matches!(err, LambdaError::Serialization(_)));
    }
}
