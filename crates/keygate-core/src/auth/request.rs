use chrono::{Duration, Utc};

use super::error::AuthError;

/// Cache parameters as supplied on the command line. `None` and the empty
/// string both mean "not supplied"; `"0"` explicitly invalidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheRequest {
    pub cache_for: Option<String>,
    pub cache_attempts: Option<String>,
}

impl CacheRequest {
    pub fn new(cache_for: Option<String>, cache_attempts: Option<String>) -> Self {
        Self {
            cache_for,
            cache_attempts,
        }
    }

    /// Validate the textual overrides.
    pub fn parse(&self) -> Result<CacheOverrides, AuthError> {
        let cache_for = supplied(&self.cache_for)
            .map(parse_cache_for)
            .transpose()?;
        let attempts = supplied(&self.cache_attempts)
            .map(parse_cache_attempts)
            .transpose()?;
        Ok(CacheOverrides {
            cache_for,
            attempts,
        })
    }
}

/// Parsed cache overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOverrides {
    /// New time window, measured from the moment the record is written
    pub cache_for: Option<Duration>,
    /// New remaining-attempts count
    pub attempts: Option<u32>,
}

impl CacheOverrides {
    pub fn is_empty(&self) -> bool {
        self.cache_for.is_none() && self.attempts.is_none()
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_cache_attempts(value: &str) -> Result<u32, AuthError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|source| AuthError::InvalidCacheAttempts {
            value: value.to_string(),
            source,
        })
}

/// Parse a humantime duration (`10s`, `10m`, `1h30m`). A bare `0` is zero
/// and a leading `-` gives a window that has already closed.
fn parse_cache_for(value: &str) -> Result<Duration, AuthError> {
    let invalid = |reason: String| AuthError::InvalidCacheDuration {
        value: value.to_string(),
        reason,
    };

    let trimmed = value.trim();
    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let std_duration = if magnitude == "0" {
        std::time::Duration::ZERO
    } else {
        humantime::parse_duration(magnitude).map_err(|e| invalid(e.to_string()))?
    };
    let duration = Duration::from_std(std_duration).map_err(|e| invalid(e.to_string()))?;
    let duration = if negative { -duration } else { duration };

    // reject windows that cannot be represented as an expiry timestamp
    Utc::now()
        .checked_add_signed(duration)
        .ok_or_else(|| invalid("duration out of range".to_string()))?;

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(cache_for: Option<&str>, cache_attempts: Option<&str>) -> CacheRequest {
        CacheRequest::new(
            cache_for.map(str::to_string),
            cache_attempts.map(str::to_string),
        )
    }

    #[test]
    fn test_nothing_supplied() {
        assert!(request(None, None).parse().unwrap().is_empty());
        assert!(request(Some(""), Some("")).parse().unwrap().is_empty());
    }

    #[test]
    fn test_parse_durations() {
        let parse = |s| request(Some(s), None).parse().unwrap().cache_for.unwrap();
        assert_eq!(parse("10s"), Duration::seconds(10));
        assert_eq!(parse("10m"), Duration::minutes(10));
        assert_eq!(parse("1h"), Duration::hours(1));
        assert_eq!(parse("1h30m"), Duration::minutes(90));
        assert_eq!(parse("0"), Duration::zero());
        assert_eq!(parse("-5m"), Duration::minutes(-5));
    }

    #[test]
    fn test_parse_attempts() {
        let parsed = request(None, Some("3")).parse().unwrap();
        assert_eq!(parsed.attempts, Some(3));
        assert_eq!(parsed.cache_for, None);

        let parsed = request(None, Some("0")).parse().unwrap();
        assert_eq!(parsed.attempts, Some(0));
    }

    #[test]
    fn test_invalid_duration() {
        let err = request(Some("soon"), None).parse().unwrap_err();
        assert!(matches!(err, AuthError::InvalidCacheDuration { ref value, .. } if value == "soon"));
    }

    #[test]
    fn test_invalid_attempts() {
        for bad in ["three", "-1", "1.5"] {
            let err = request(None, Some(bad)).parse().unwrap_err();
            assert!(matches!(err, AuthError::InvalidCacheAttempts { .. }), "{bad}");
        }
    }

    #[test]
    fn test_duration_out_of_range() {
        let err = request(Some("10000000years"), None).parse().unwrap_err();
        assert!(matches!(err, AuthError::InvalidCacheDuration { .. }));
    }
}
