use std::collections::HashMap;
use std::sync::Mutex;

use super::{RecordKey, RecordStore, StoreError};

/// In-process record store. Nothing survives the process; useful for tests
/// and for dry runs of the gate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordKey, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<RecordKey, Vec<u8>>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn add(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        if records.contains_key(key) {
            return Err(StoreError::Duplicate);
        }
        records.insert(key.clone(), payload.to_vec());
        Ok(())
    }

    fn update(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        self.lock()?.insert(key.clone(), payload.to_vec());
        Ok(())
    }

    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError> {
        self.lock()?.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        self.lock()?
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
