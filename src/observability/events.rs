//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read
    ConfigLoaded,
    /// Descriptor added to the registry from disk
    SchemaLoaded,
    /// Input rejected by a schema
    ValidationRejected,
    /// Record validated, hashed and persisted
    RecordCreated,
    /// Storage collaborator refused a save or fetch
    StorageFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::RecordCreated => "RECORD_CREATED",
            Event::StorageFailed => "STORAGE_FAILED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationRejected => Severity::Warn,
            Event::StorageFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
