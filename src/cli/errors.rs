//! CLI-specific error types
//!
//! Errors raised by the library keep their own code on the wire; the CLI
//! adds codes only for its own concerns (config, stdin/stdout, request
//! shape).

use std::fmt;
use std::io;

use serde_json::Value;

use crate::config::ConfigError;
use crate::credentials::CredentialError;
use crate::schema::{SchemaError, ValidationError};
use crate::serializers::SerializerError;
use crate::store::StorageError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Request line is not a well-formed request
    InvalidRequest,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PROFILES_CLI_CONFIG_ERROR",
            Self::IoError => "PROFILES_CLI_IO_ERROR",
            Self::InvalidRequest => "PROFILES_CLI_INVALID_REQUEST",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
    details: Option<Value>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            details: None,
        }
    }

    /// Carry an error raised below the CLI, keeping its code
    fn rejected(code: &'static str, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Malformed request
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field messages, for validation failures
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::rejected(e.code().code(), e.message(), None)
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        let details = e.to_json();
        Self::rejected(e.code(), format!("'{}' rejected input", e.schema()), Some(details))
    }
}

impl From<CredentialError> for CliError {
    fn from(e: CredentialError) -> Self {
        Self::from(SerializerError::Credential(e))
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::from(SerializerError::Storage(e))
    }
}

impl From<SerializerError> for CliError {
    fn from(e: SerializerError) -> Self {
        match e {
            SerializerError::Validation(e) => Self::from(e),
            other => Self::rejected(other.code(), other.to_string(), None),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldError;

    #[test]
    fn test_validation_error_keeps_code_and_details() {
        let err = CliError::from(ValidationError::single("hello", FieldError::missing_field("name")));
        assert_eq!(err.code_str(), "PROFILES_VALIDATION_FAILED");
        assert!(err.details().unwrap().get("name").is_some());
    }

    #[test]
    fn test_storage_error_through_serializer() {
        let err = CliError::from(SerializerError::Storage(StorageError::NotFound(4)));
        assert_eq!(err.code_str(), "PROFILES_NOT_FOUND");
        assert!(err.message().contains('4'));
        assert!(err.details().is_none());
    }

    #[test]
    fn test_display() {
        let err = CliError::invalid_request("missing 'op'");
        assert_eq!(err.to_string(), "PROFILES_CLI_INVALID_REQUEST: missing 'op'");
    }
}
