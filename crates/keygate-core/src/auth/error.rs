use thiserror::Error;

use super::challenge::ChallengeError;
use crate::cache::{DecodeError, EncodeError};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to get cached auth: {0}")]
    CacheRead(#[source] StoreError),

    #[error("failed to update cached auth: {0}")]
    CacheWrite(#[source] StoreError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to convert --cache-for '{value}' to duration: {reason}")]
    InvalidCacheDuration { value: String, reason: String },

    #[error("failed to convert --cache-n '{value}' to a non-negative integer: {source}")]
    InvalidCacheAttempts {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("authentication error: {0}")]
    Authentication(#[from] ChallengeError),
}
