//! # Storage Errors

use thiserror::Error;

use crate::models::RecordId;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a storage collaborator. Propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No record with this id
    #[error("Record {0} not found")]
    NotFound(RecordId),

    /// Backend refused or failed the operation
    #[error("Storage error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::NotFound(_) => 404,
            StorageError::Backend(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StorageError::NotFound(3).status_code(), 404);
        assert_eq!(StorageError::Backend("down".into()).status_code(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(StorageError::NotFound(3).to_string(), "Record 3 not found");
    }
}
