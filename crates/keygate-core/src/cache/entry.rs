use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("malformed auth cache record: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Error, Debug)]
#[error("failed to encode auth cache record: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Authentication cache state for one account.
///
/// Stored as JSON with `forAttempts` / `forTime` field names. Unknown fields
/// are ignored so newer records stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Privileged operations that may still skip the challenge
    #[serde(rename = "forAttempts", default)]
    pub remaining_attempts: u32,

    /// Challenge is skipped while now is strictly before this instant
    #[serde(rename = "forTime", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at > now)
    }

    pub fn has_attempts(&self) -> bool {
        self.remaining_attempts > 0
    }
}

pub fn encode(entry: &CacheEntry) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(entry)?)
}

/// Decode a stored record. An empty payload is a first use and yields the
/// zero entry.
pub fn decode(bytes: &[u8]) -> Result<CacheEntry, DecodeError> {
    if bytes.is_empty() {
        return Ok(CacheEntry::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_decode_empty_is_zero_entry() {
        assert_eq!(decode(b"").unwrap(), CacheEntry::default());
    }

    #[test]
    fn test_round_trip() {
        let entry = CacheEntry {
            remaining_attempts: 3,
            expires_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()),
        };
        assert_eq!(decode(&encode(&entry).unwrap()).unwrap(), entry);
    }

    #[test]
    fn test_encode_zero_entry_is_not_empty() {
        // empty bytes would read back as "no record"
        let bytes = encode(&CacheEntry::default()).unwrap();
        assert_eq!(bytes, br#"{"forAttempts":0}"#);
        assert_eq!(decode(&bytes).unwrap(), CacheEntry::default());
    }

    #[test]
    fn test_field_names_preserved() {
        let entry = CacheEntry {
            remaining_attempts: 2,
            expires_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()),
        };
        let json: serde_json::Value = serde_json::from_slice(&encode(&entry).unwrap()).unwrap();
        assert_eq!(json["forAttempts"], 2);
        assert_eq!(json["forTime"], "2026-03-01T12:30:00Z");
    }

    #[test]
    fn test_decode_legacy_zero_time() {
        let entry = decode(br#"{"forAttempts":0,"forTime":"0001-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(entry.remaining_attempts, 0);
        assert!(!entry.is_fresh_at(Utc::now()));
    }

    #[test]
    fn test_decode_offset_timestamp() {
        let entry = decode(br#"{"forAttempts":1,"forTime":"2026-03-01T14:30:00.5+02:00"}"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()
            + Duration::milliseconds(500);
        assert_eq!(entry.expires_at, Some(expected));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let entry = decode(br#"{"forAttempts":4,"note":"from a newer version"}"#).unwrap();
        assert_eq!(entry.remaining_attempts, 4);
        assert_eq!(entry.expires_at, None);
    }

    #[test]
    fn test_decode_truncated_fails() {
        assert!(decode(br#"{"forAttempts":3,"forTi"#).is_err());
    }

    #[test]
    fn test_decode_negative_attempts_fails() {
        assert!(decode(br#"{"forAttempts":-1}"#).is_err());
    }

    #[test]
    fn test_freshness_is_strict() {
        let now = Utc::now();
        let entry = CacheEntry {
            remaining_attempts: 0,
            expires_at: Some(now),
        };
        assert!(!entry.is_fresh_at(now));
        assert!(entry.is_fresh_at(now - Duration::seconds(1)));
        assert!(!CacheEntry::default().is_fresh_at(now));
    }
}
