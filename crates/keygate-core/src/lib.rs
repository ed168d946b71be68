//! Keygate core - OS keychain access gated by device authentication.
//!
//! This crate provides:
//! - `store`: the `RecordStore` seam over the OS credential store
//! - `cache`: the per-account authentication cache record and its codec
//! - `auth`: the `AuthGate` deciding when a fresh challenge is required
//! - `credentials`: the privileged add/get/remove operations on user secrets

pub mod auth;
pub mod cache;
pub mod credentials;
pub mod store;

pub use auth::{
    AuthError, AuthGate, AuthMethod, CacheRequest, ChallengeError, Challenger, Exemption,
    PasscodeChallenger,
};
pub use cache::CacheEntry;
pub use credentials::{AddOutcome, CredentialError, CredentialTarget, Credentials};
pub use store::{KeyringStore, MemoryStore, RecordKey, RecordStore, StoreError};
