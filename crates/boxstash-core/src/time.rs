//! Timestamp helpers
//!
//! Rows store epoch seconds; the wire format is RFC 3339 ("internet time").

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Convert epoch seconds to an RFC 3339 UTC timestamp
///
/// `0` means "unset" and renders as an empty string.
pub fn to_internet_time(t: i64) -> String {
    if t == 0 {
        return String::new();
    }
    DateTime::from_timestamp(t, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Convert an RFC 3339 timestamp to epoch seconds
///
/// Empty or unparseable input yields `0`.
pub fn to_unix_time(t: &str) -> i64 {
    DateTime::parse_from_rfc3339(t)
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Source of "now" for lifecycle stamping
pub trait Clock: Send + Sync {
    /// Current time in epoch seconds
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually driven clock for deterministic tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, t: i64) {
        self.now.store(t, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Serde adapter: epoch seconds in memory, RFC 3339 string on the wire
pub mod internet_time {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_internet_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(super::to_unix_time).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_renders_empty() {
        assert_eq!(to_internet_time(0), "");
    }

    #[test]
    fn test_known_timestamp() {
        assert_eq!(to_internet_time(1_500_000_000), "2017-07-14T02:40:00Z");
        assert_eq!(to_unix_time("2017-07-14T02:40:00Z"), 1_500_000_000);
    }

    #[test]
    fn test_offsets_are_normalized() {
        assert_eq!(to_unix_time("2017-07-14T04:40:00+02:00"), 1_500_000_000);
    }

    #[test]
    fn test_garbage_parses_to_zero() {
        assert_eq!(to_unix_time(""), 0);
        assert_eq!(to_unix_time("yesterday"), 0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(5);
        assert_eq!(clock.now(), 105);
        clock.set(7);
        assert_eq!(clock.now(), 7);
    }

    proptest! {
        #[test]
        fn prop_internet_time_is_reversible(t in 1i64..4_102_444_800) {
            prop_assert_eq!(to_unix_time(&to_internet_time(t)), t);
        }
    }
}
