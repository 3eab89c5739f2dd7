//! In-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::models::{Model, RecordId};

use super::errors::{StorageError, StorageResult};
use super::Store;

/// Records kept in a map behind an `RwLock`; ids start at 1.
#[derive(Debug)]
pub struct MemoryStore<M> {
    records: RwLock<BTreeMap<RecordId, M>>,
    next_id: AtomicU64,
}

impl<M> Default for MemoryStore<M> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<M: Model> MemoryStore<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, ordered by id
    pub fn all(&self) -> StorageResult<Vec<M>> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("Lock poisoned".to_string()))?;
        Ok(records.values().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: Model> Store<M> for MemoryStore<M> {
    fn save(&self, mut record: M) -> StorageResult<M> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::Backend("Lock poisoned".to_string()))?;

        let id = match record.id() {
            Some(id) => {
                let next = id
                    .checked_add(1)
                    .ok_or_else(|| StorageError::Backend(format!("Record id {} exhausts the id space", id)))?;
                self.next_id.fetch_max(next, Ordering::SeqCst);
                id
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                record.assign_id(id);
                id
            }
        };

        records.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: RecordId) -> StorageResult<M> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("Lock poisoned".to_string()))?;
        records.get(&id).cloned().ok_or(StorageError::NotFound(id))
    }
}
