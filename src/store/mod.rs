//! # Storage Collaborator
//!
//! The transformer persists through [`Store`]. The engine behind it owns its
//! own concurrency and transaction discipline; [`MemoryStore`] is the
//! in-process implementation used by the CLI and tests.

mod errors;
mod memory;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryStore;

use crate::models::{Model, RecordId};

/// Persistence for one record type
pub trait Store<M: Model>: Send + Sync {
    /// Persist a record, assigning an id if it has none
    fn save(&self, record: M) -> StorageResult<M>;

    /// Fetch a record by id
    fn fetch(&self, id: RecordId) -> StorageResult<M>;
}
