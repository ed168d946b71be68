//! Authentication gate for privileged keychain operations.
//!
//! This module provides:
//! - `AuthGate`: decides per operation whether a fresh challenge is needed,
//!   honoring the account's cached time and attempt exemptions
//! - `Challenger`: the device authentication seam
//! - `PasscodeChallenger`: a challenger verifying an Argon2-hashed passcode
//!
//! Cache overrides (`--cache-for`, `--cache-n`) are validated before the
//! cache is read, so a typo never costs a prompt.

pub mod challenge;
pub mod error;
pub mod gate;
pub mod passcode;
pub mod request;

pub use challenge::{AuthMethod, ChallengeError, Challenger};
pub use error::AuthError;
pub use gate::{AuthGate, Exemption};
pub use passcode::PasscodeChallenger;
pub use request::{CacheOverrides, CacheRequest};
