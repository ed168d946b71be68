//! Secure record storage.
//!
//! Records are opaque byte payloads keyed by `(namespace, account, label)`.
//! The gate keeps its cache state in the same store it protects, under a
//! reserved namespace, so every backend only needs these four operations.

pub mod keychain;
pub mod memory;

pub use keychain::KeyringStore;
pub use memory::MemoryStore;

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("item already exists")]
    Duplicate,

    #[error("item not found")]
    NotFound,

    #[error("credential store error: {0}")]
    Backend(String),
}

/// Composite key of a stored record. All three parts match exactly, so an
/// empty account is its own partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub namespace: String,
    pub account: String,
    pub label: String,
}

impl RecordKey {
    pub fn new(
        namespace: impl Into<String>,
        account: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            account: account.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "namespace='{}' account='{}' label='{}'",
            self.namespace, self.account, self.label
        )
    }
}

pub trait RecordStore {
    /// Insert a new record. Fails with `StoreError::Duplicate` if the key exists.
    fn add(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError>;

    /// Replace the payload of a record.
    fn update(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError>;

    /// Fetch a record payload. Fails with `StoreError::NotFound` if absent.
    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError>;

    /// Remove a record. Fails with `StoreError::NotFound` if absent.
    fn delete(&self, key: &RecordKey) -> Result<(), StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn add(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        (**self).add(key, payload)
    }

    fn update(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        (**self).update(key, payload)
    }

    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError> {
        (**self).get(key)
    }

    fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// Add the record, falling back to an update when it already exists.
pub fn upsert<S: RecordStore + ?Sized>(
    store: &S,
    key: &RecordKey,
    payload: &[u8],
) -> Result<(), StoreError> {
    match store.add(key, payload) {
        Err(StoreError::Duplicate) => store.update(key, payload),
        other => other,
    }
}
