//! Per-account authentication cache.
//!
//! The cache remembers a recent successful challenge for an account, either
//! until an absolute expiry time or for a number of further privileged
//! operations. It is persisted as a record in the secure store under a
//! reserved namespace, one record per account.

pub mod entry;

pub use entry::{decode, encode, CacheEntry, DecodeError, EncodeError};

use crate::store::RecordKey;

/// Namespace holding cache records. Chosen so it cannot be mistaken for a
/// service name a user would pick.
pub const CACHE_NAMESPACE: &str = "/keygate/auth-cache";

/// Store key of the cache record for `account`.
pub fn cache_key(account: &str) -> RecordKey {
    RecordKey::new(CACHE_NAMESPACE, account, CACHE_NAMESPACE)
}
