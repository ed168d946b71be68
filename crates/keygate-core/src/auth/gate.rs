use chrono::Utc;
use tracing::{debug, info, warn};

use super::challenge::{AuthMethod, Challenger};
use super::error::AuthError;
use super::request::{CacheOverrides, CacheRequest};
use crate::cache::{self, CacheEntry};
use crate::store::{self, RecordStore, StoreError};

/// How a gate evaluation was passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    /// The cached time window is still open
    Time,
    /// A cached attempt was consumed
    Attempts,
    /// A fresh challenge succeeded
    Challenged,
}

/// Gates privileged operations behind a device challenge, reusing recent
/// successful challenges according to the account's cache record.
pub struct AuthGate<S, C> {
    store: S,
    challenger: C,
    method: AuthMethod,
}

impl<S: RecordStore, C: Challenger> AuthGate<S, C> {
    pub fn new(store: S, challenger: C) -> Self {
        Self {
            store,
            challenger,
            method: AuthMethod::Any,
        }
    }

    pub fn with_method(mut self, method: AuthMethod) -> Self {
        self.method = method;
        self
    }

    /// Decide whether `account` may proceed, challenging the user with
    /// `reason` when no cached exemption applies, then persist any cache
    /// change requested by `request`.
    pub fn authenticate(
        &self,
        account: &str,
        reason: &str,
        request: &CacheRequest,
    ) -> Result<Exemption, AuthError> {
        let mut overrides = request.parse()?;
        let mut entry = self.load(account)?;

        let exemption = if entry.is_fresh_at(Utc::now()) {
            debug!(account, expires_at = ?entry.expires_at, "cached auth time is not expired");
            Exemption::Time
        } else if entry.has_attempts() {
            debug!(account, remaining = entry.remaining_attempts, "cached auth attempts are not expired");
            // explicit --cache-n wins over the implicit step down
            if overrides.attempts.is_none() {
                overrides.attempts = Some(entry.remaining_attempts - 1);
            }
            Exemption::Attempts
        } else {
            debug!(account, "have to auth");
            match self.challenger.challenge(self.method, reason) {
                Ok(true) => Exemption::Challenged,
                Ok(false) => {
                    warn!(account, "authentication denied");
                    return Err(AuthError::AuthenticationFailed);
                }
                Err(e) => {
                    warn!(account, error = %e, "authentication unavailable");
                    return Err(AuthError::Authentication(e));
                }
            }
        };

        if !overrides.is_empty() {
            self.save(account, &mut entry, overrides)?;
        }

        Ok(exemption)
    }

    /// Current cache record for `account`, without evaluating it.
    pub fn cached(&self, account: &str) -> Result<CacheEntry, AuthError> {
        self.load(account)
    }

    fn load(&self, account: &str) -> Result<CacheEntry, AuthError> {
        match self.store.get(&cache::cache_key(account)) {
            Ok(bytes) => {
                let entry = cache::decode(&bytes)?;
                debug!(account, ?entry, "found cached auth");
                Ok(entry)
            }
            Err(StoreError::NotFound) => {
                debug!(account, "cached auth is empty");
                Ok(CacheEntry::default())
            }
            Err(e) => Err(AuthError::CacheRead(e)),
        }
    }

    fn save(
        &self,
        account: &str,
        entry: &mut CacheEntry,
        overrides: CacheOverrides,
    ) -> Result<(), AuthError> {
        if let Some(attempts) = overrides.attempts {
            entry.remaining_attempts = attempts;
        }
        if let Some(cache_for) = overrides.cache_for {
            // measured from now, after any challenge has been answered
            let expires_at = Utc::now().checked_add_signed(cache_for).ok_or_else(|| {
                AuthError::InvalidCacheDuration {
                    value: cache_for.to_string(),
                    reason: "duration out of range".to_string(),
                }
            })?;
            entry.expires_at = Some(expires_at);
        }

        info!(account, ?entry, "updating cached auth");
        let payload = cache::encode(entry)?;
        store::upsert(&self.store, &cache::cache_key(account), &payload)
            .map_err(AuthError::CacheWrite)
    }
}
