use std::io;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use tracing::{debug, warn};

use super::challenge::{AuthMethod, ChallengeError, Challenger};
use crate::store::{self, RecordKey, RecordStore, StoreError};

/// Namespace holding the device passcode hash.
pub const PASSCODE_NAMESPACE: &str = "/keygate/passcode";

/// Account of the passcode record; the passcode belongs to the device
const PASSCODE_ACCOUNT: &str = "device";

/// Prompts before a challenge counts as denied
const DEFAULT_TRIES: u32 = 3;

type PromptFn = Box<dyn Fn(&str) -> io::Result<String>>;

/// Device authentication by passcode.
///
/// The passcode is kept as an Argon2 PHC string in the record store; the
/// plain passcode is never stored. Prompting is injected so the binary can
/// read from the terminal without echo.
pub struct PasscodeChallenger<S> {
    store: S,
    prompt: PromptFn,
    tries: u32,
}

fn passcode_key() -> RecordKey {
    RecordKey::new(PASSCODE_NAMESPACE, PASSCODE_ACCOUNT, PASSCODE_NAMESPACE)
}

fn store_error(err: StoreError) -> ChallengeError {
    ChallengeError::Store(err.to_string())
}

impl<S: RecordStore> PasscodeChallenger<S> {
    pub fn new(store: S, prompt: impl Fn(&str) -> io::Result<String> + 'static) -> Self {
        Self {
            store,
            prompt: Box::new(prompt),
            tries: DEFAULT_TRIES,
        }
    }

    /// Number of prompts per challenge (at least one)
    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    pub fn is_configured(&self) -> Result<bool, ChallengeError> {
        match self.store.get(&passcode_key()) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(store_error(e)),
        }
    }

    /// Hash and store a new passcode, replacing any existing one.
    pub fn set_passcode(&self, passcode: &str) -> Result<(), ChallengeError> {
        if passcode.is_empty() {
            return Err(ChallengeError::EmptyPasscode);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(passcode.as_bytes(), &salt)
            .map_err(|e| ChallengeError::Hash(e.to_string()))?
            .to_string();
        store::upsert(&self.store, &passcode_key(), hash.as_bytes()).map_err(store_error)
    }

    pub fn clear_passcode(&self) -> Result<(), ChallengeError> {
        match self.store.delete(&passcode_key()) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound) => Err(ChallengeError::NotConfigured),
            Err(e) => Err(store_error(e)),
        }
    }

    fn stored_hash(&self) -> Result<String, ChallengeError> {
        let bytes = match self.store.get(&passcode_key()) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => return Err(ChallengeError::NotConfigured),
            Err(e) => return Err(store_error(e)),
        };
        String::from_utf8(bytes).map_err(|e| ChallengeError::Corrupt(e.to_string()))
    }
}

impl<S: RecordStore> Challenger for PasscodeChallenger<S> {
    fn challenge(&self, method: AuthMethod, reason: &str) -> Result<bool, ChallengeError> {
        if method == AuthMethod::Biometrics {
            return Err(ChallengeError::Unavailable(method));
        }

        let stored = self.stored_hash()?;
        let hash =
            PasswordHash::new(&stored).map_err(|e| ChallengeError::Corrupt(e.to_string()))?;
        let prompt = format!("keygate wants to {reason}.\nPasscode: ");

        for attempt in 1..=self.tries {
            let entered = (self.prompt)(&prompt)?;
            if Argon2::default()
                .verify_password(entered.as_bytes(), &hash)
                .is_ok()
            {
                debug!(attempt, "passcode accepted");
                return Ok(true);
            }
            warn!(attempt, tries = self.tries, "wrong passcode");
        }
        Ok(false)
    }
}
