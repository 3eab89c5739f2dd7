//! Errors raised by the create pipeline

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::schema::ValidationError;
use crate::store::StorageError;

/// Result type for serializer operations
pub type SerializerResult<T> = Result<T, SerializerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializerError {
    /// Input violated the schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage collaborator failed, propagated unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Credential could not be hashed
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A server-side field has no value in the request context
    #[error("Request context does not provide '{0}'")]
    MissingContext(&'static str),
}

impl SerializerError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SerializerError::Validation(_) => ValidationError::CODE,
            SerializerError::Storage(StorageError::NotFound(_)) => "PROFILES_NOT_FOUND",
            SerializerError::Storage(_) => "PROFILES_STORAGE_FAILED",
            SerializerError::Credential(_) => "PROFILES_CREDENTIAL_FAILED",
            SerializerError::MissingContext(_) => "PROFILES_AUTHENTICATION_REQUIRED",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            SerializerError::Validation(e) => e.status_code(),
            SerializerError::Storage(e) => e.status_code(),
            SerializerError::Credential(e) => e.status_code(),
            SerializerError::MissingContext(_) => 401,
        }
    }

    /// Whether the caller sent something wrong, as opposed to a server fault
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldError;

    #[test]
    fn test_status_codes() {
        let validation = ValidationError::single("hello", FieldError::missing_field("name"));
        assert_eq!(SerializerError::from(validation).status_code(), 400);
        assert_eq!(SerializerError::from(StorageError::NotFound(1)).status_code(), 404);
        assert_eq!(SerializerError::from(CredentialError::HashingFailed).status_code(), 500);
        assert_eq!(SerializerError::MissingContext("user_profile").status_code(), 401);
    }

    #[test]
    fn test_codes() {
        assert_eq!(SerializerError::from(StorageError::NotFound(1)).code(), "PROFILES_NOT_FOUND");
        assert_eq!(
            SerializerError::from(StorageError::Backend("x".into())).code(),
            "PROFILES_STORAGE_FAILED"
        );
        assert!(!SerializerError::from(CredentialError::HashingFailed).is_client_error());
    }

    #[test]
    fn test_storage_error_display_unchanged() {
        let err = SerializerError::from(StorageError::NotFound(9));
        assert_eq!(err.to_string(), "Record 9 not found");
    }
}
