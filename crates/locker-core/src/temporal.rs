//! # Temporal Types — UTC Timestamps and Clocks
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds, and the
//! `Clock` trait through which the session reads the current time.
//!
//! ## Formats
//!
//! - Wire/serde form: ISO8601 with Z suffix, `2024-07-21T10:05:00Z`.
//! - Seed fixture form: `2024-07-21 10:05 AM`, interpreted as UTC.
//! - Display form: short US locale, `7/21/24, 10:05 AM`.
//!
//! Deserialization accepts all three textual forms except the display one,
//! so seed documents can be written by hand.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimestampError;

/// Seed fixture layout: `2024-07-21 10:05 AM`.
const FIXTURE_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// Short locale layout used for display: `7/21/24, 10:05 AM`.
const SHORT_DISPLAY_FORMAT: &str = "%-m/%-d/%y, %-I:%M %p";

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Ordering is chronological, so `lastUpdate` comparisons and the
/// chronological parcel sort use `Ord` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TimestampError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| TimestampError {
                input: secs.to_string(),
                reason: "out of range Unix timestamp".to_string(),
            })
    }

    /// Parse an RFC 3339 timestamp, converting any offset to UTC.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TimestampError {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse the seed fixture form `YYYY-MM-DD hh:mm AM`, as UTC.
    pub fn parse_fixture(s: &str) -> Result<Self, TimestampError> {
        let naive = NaiveDateTime::parse_from_str(s.trim(), FIXTURE_FORMAT).map_err(|e| {
            TimestampError {
                input: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(naive.and_utc()))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// A timestamp `secs` seconds later (saturating at the representable range).
    pub fn plus_secs(&self, secs: i64) -> Self {
        self.0
            .checked_add_signed(chrono::Duration::seconds(secs))
            .map(Self)
            .unwrap_or(*self)
    }

    /// Render as ISO8601 with Z suffix (e.g., `2024-07-21T10:05:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Render in the short locale form shown next to parcels.
    pub fn to_short_display(&self) -> String {
        self.0.format(SHORT_DISPLAY_FORMAT).to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_short_display())
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value).or_else(|_| Timestamp::parse_fixture(&value))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ─── Clock ───────────────────────────────────────────────────────────

/// Source of the current time for status stamps and notice expiry.
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    epoch_secs: Arc<AtomicI64>,
}

impl ManualClock {
    /// Start the clock at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            epoch_secs: Arc::new(AtomicI64::new(start.epoch_secs())),
        }
    }

    /// Move the clock forward (or backward, for a negative value).
    pub fn advance_secs(&self, secs: i64) {
        self.epoch_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, ts: Timestamp) {
        self.epoch_secs.store(ts.epoch_secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let secs = self.epoch_secs.load(Ordering::SeqCst);
        Timestamp::from_epoch_secs(secs).unwrap_or_else(|_| Timestamp::now())
    }
}
