use keyring::Entry;
use tracing::debug;

use super::{RecordKey, RecordStore, StoreError};

/// Record store backed by the OS credential store (macOS Keychain, Windows
/// Credential Manager, Linux kernel keyutils).
///
/// A record maps onto a keyring entry whose service is the namespace and
/// whose user is `<account length>:<account>:<label>`. The length prefix
/// keeps the mapping one-to-one for any account or label, and the user is
/// never empty, which some backends (macOS) reject.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self, key: &RecordKey) -> Result<Entry, StoreError> {
        Entry::new(&key.namespace, &entry_user(key)).map_err(map_error)
    }
}

fn entry_user(key: &RecordKey) -> String {
    format!("{}:{}:{}", key.account.len(), key.account, key.label)
}

fn map_error(err: keyring::Error) -> StoreError {
    match err {
        keyring::Error::NoEntry => StoreError::NotFound,
        other => StoreError::Backend(other.to_string()),
    }
}

impl RecordStore for KeyringStore {
    fn add(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        let entry = self.entry(key)?;
        // keyring writes are upserts, so probe first to report duplicates
        match entry.get_secret() {
            Ok(_) => return Err(StoreError::Duplicate),
            Err(keyring::Error::NoEntry) => {}
            Err(e) => return Err(map_error(e)),
        }
        debug!(%key, "adding keychain record");
        entry.set_secret(payload).map_err(map_error)
    }

    fn update(&self, key: &RecordKey, payload: &[u8]) -> Result<(), StoreError> {
        debug!(%key, "updating keychain record");
        self.entry(key)?.set_secret(payload).map_err(map_error)
    }

    fn get(&self, key: &RecordKey) -> Result<Vec<u8>, StoreError> {
        self.entry(key)?.get_secret().map_err(map_error)
    }

    fn delete(&self, key: &RecordKey) -> Result<(), StoreError> {
        debug!(%key, "deleting keychain record");
        self.entry(key)?.delete_credential().map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_user_never_empty() {
        let key = RecordKey::new("/keygate/auth-cache", "", "");
        assert_eq!(entry_user(&key), "0::");
    }

    #[test]
    fn test_empty_account_distinct_from_named() {
        let empty = RecordKey::new("/keygate/auth-cache", "", "/keygate/auth-cache");
        let named = RecordKey::new("/keygate/auth-cache", "johndoe", "/keygate/auth-cache");
        assert_ne!(entry_user(&empty), entry_user(&named));
        assert_eq!(entry_user(&named), "7:johndoe:/keygate/auth-cache");
    }

    #[test]
    fn test_label_is_part_of_identity() {
        let bare = RecordKey::new("svc", "acct", "");
        let labelled = RecordKey::new("svc", "acct", "svc");
        assert_ne!(entry_user(&bare), entry_user(&labelled));
    }

    #[test]
    fn test_separators_in_parts_stay_unambiguous() {
        let a = RecordKey::new("svc", "a:1", "b");
        let b = RecordKey::new("svc", "a", "1:b");
        assert_ne!(entry_user(&a), entry_user(&b));

        // namespaces are never rewritten, so "a/b" and "a" + label "b" differ
        let slash = RecordKey::new("a/b", "acct", "");
        let split = RecordKey::new("a", "acct", "b");
        assert_ne!(
            (slash.namespace.as_str(), entry_user(&slash)),
            (split.namespace.as_str(), entry_user(&split))
        );
    }

    #[test]
    fn test_no_entry_maps_to_not_found() {
        assert!(matches!(map_error(keyring::Error::NoEntry), StoreError::NotFound));
    }
}
