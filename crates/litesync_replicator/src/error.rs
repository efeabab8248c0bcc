//! Error types for replicator configuration.

use std::fmt;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A configuration field that must be set before replication can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The local database the session runs for.
    Database,
    /// The peer to replicate with.
    Target,
}

impl RequiredField {
    /// Returns the field name as it appears in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Database => "database",
            RequiredField::Target => "target",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building or validating a replicator configuration.
///
/// Every error is reported synchronously to the caller. None of them are
/// transient: repeating the same call with the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A factory or parser was handed an unusable value.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the value.
        message: String,
    },

    /// The validation checkpoint found a required field unset.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// The field that is absent.
        field: RequiredField,
    },
}

impl ConfigError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a missing-field error.
    pub fn missing(field: RequiredField) -> Self {
        Self::MissingRequiredField { field }
    }

    /// Returns the missing field, if this is a validation failure.
    pub fn missing_field(&self) -> Option<RequiredField> {
        match self {
            ConfigError::MissingRequiredField { field } => Some(*field),
            ConfigError::InvalidArgument { .. } => None,
        }
    }

    /// Returns true if this error can be retried.
    ///
    /// Configuration errors never are.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_retryable() {
        assert!(!ConfigError::invalid_argument("bad url").is_retryable());
        assert!(!ConfigError::missing(RequiredField::Target).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = ConfigError::missing(RequiredField::Database);
        assert_eq!(err.to_string(), "missing required field: database");

        let err = ConfigError::missing(RequiredField::Target);
        assert_eq!(err.to_string(), "missing required field: target");

        let err = ConfigError::invalid_argument("database `otherdb` is closed");
        assert!(err.to_string().starts_with("invalid argument:"));
        assert!(err.to_string().contains("otherdb"));
    }

    #[test]
    fn missing_field_accessor() {
        assert_eq!(
            ConfigError::missing(RequiredField::Target).missing_field(),
            Some(RequiredField::Target)
        );
        assert_eq!(ConfigError::invalid_argument("x").missing_field(), None);
    }
}
