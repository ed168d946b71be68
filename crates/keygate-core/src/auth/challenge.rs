use thiserror::Error;

/// Which device authentication methods a challenge may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMethod {
    /// Any method the device offers
    #[default]
    Any,
    /// Biometrics only
    Biometrics,
    /// Passcode only
    Passcode,
}

#[derive(Error, Debug)]
pub enum ChallengeError {
    #[error("authentication method {0:?} is not available")]
    Unavailable(AuthMethod),

    #[error("no device passcode is configured (run `keygate passcode set`)")]
    NotConfigured,

    #[error("failed to read passcode: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("passcode cannot be empty")]
    EmptyPasscode,

    #[error("stored passcode is unreadable: {0}")]
    Corrupt(String),

    #[error("failed to hash passcode: {0}")]
    Hash(String),

    #[error("credential store error: {0}")]
    Store(String),
}

/// A device-level authentication prompt. Blocks until the user answers.
///
/// `Ok(false)` is an explicit denial; `Err` means the device could not
/// authenticate at all.
pub trait Challenger {
    fn challenge(&self, method: AuthMethod, reason: &str) -> Result<bool, ChallengeError>;
}

impl<T: Challenger + ?Sized> Challenger for &T {
    fn challenge(&self, method: AuthMethod, reason: &str) -> Result<bool, ChallengeError> {
        (**self).challenge(method, reason)
    }
}
