//! # Credential Errors

use thiserror::Error;

/// Result type for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Credential hashing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Hash computation failed
    #[error("Internal error: credential hashing failed")]
    HashingFailed,

    /// Stored digest is not a valid PHC string
    #[error("Stored credential digest is malformed")]
    MalformedDigest,

    /// Cost parameters rejected by the hasher
    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),
}

impl CredentialError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        500
    }
}
