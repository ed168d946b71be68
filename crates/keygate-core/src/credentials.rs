//! Privileged operations on user credentials.
//!
//! Each operation here is meant to run only after `AuthGate::authenticate`
//! has passed for the same account.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::store::{RecordKey, RecordStore, StoreError};

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("required flag(s) \"service\" not set")]
    MissingService,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("keychain item already exists for {0}, use --update to update it")]
    AlreadyExists(CredentialTarget),

    #[error("keychain item not found for {0}")]
    NotFound(CredentialTarget),

    #[error("no password found or password is empty")]
    Empty,

    #[error("stored password is not valid UTF-8")]
    InvalidUtf8,

    #[error("failed to access keychain item: {0}")]
    Store(#[source] StoreError),
}

/// A user credential addressed by service, account and optional label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialTarget {
    pub service: String,
    pub account: String,
    pub label: String,
}

impl CredentialTarget {
    pub fn new(
        service: impl Into<String>,
        account: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
            label: label.into(),
        }
    }

    /// Check the target names a service.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.service.is_empty() {
            return Err(CredentialError::MissingService);
        }
        Ok(())
    }

    fn key(&self) -> Result<RecordKey, CredentialError> {
        self.validate()?;
        Ok(RecordKey::new(&self.service, &self.account, &self.label))
    }
}

impl fmt::Display for CredentialTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service='{}'", self.service)?;
        if !self.account.is_empty() {
            write!(f, " account='{}'", self.account)?;
        }
        if !self.label.is_empty() {
            write!(f, " label='{}'", self.label)?;
        }
        Ok(())
    }
}

/// What `Credentials::add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Updated,
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddOutcome::Added => f.write_str("added"),
            AddOutcome::Updated => f.write_str("updated"),
        }
    }
}

pub struct Credentials<S> {
    store: S,
}

impl<S: RecordStore> Credentials<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a password. An existing item is only replaced when `update` is set.
    pub fn add(
        &self,
        target: &CredentialTarget,
        password: &str,
        update: bool,
    ) -> Result<AddOutcome, CredentialError> {
        let key = target.key()?;
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        match self.store.add(&key, password.as_bytes()) {
            Ok(()) => Ok(AddOutcome::Added),
            Err(StoreError::Duplicate) if update => {
                debug!(%target, "item exists, updating");
                self.store
                    .update(&key, password.as_bytes())
                    .map_err(CredentialError::Store)?;
                Ok(AddOutcome::Updated)
            }
            Err(StoreError::Duplicate) => Err(CredentialError::AlreadyExists(target.clone())),
            Err(e) => Err(CredentialError::Store(e)),
        }
    }

    /// Retrieve a password
    pub fn get(&self, target: &CredentialTarget) -> Result<String, CredentialError> {
        let bytes = match self.store.get(&target.key()?) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => return Err(CredentialError::NotFound(target.clone())),
            Err(e) => return Err(CredentialError::Store(e)),
        };
        let password = String::from_utf8(bytes).map_err(|_| CredentialError::InvalidUtf8)?;
        if password.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(password)
    }

    /// Delete a stored password
    pub fn remove(&self, target: &CredentialTarget) -> Result<(), CredentialError> {
        match self.store.delete(&target.key()?) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(CredentialError::NotFound(target.clone())),
            Err(e) => Err(CredentialError::Store(e)),
        }
    }
}
