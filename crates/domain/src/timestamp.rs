// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp normalization.
//!
//! The same logical field (for example an activity's `createdAt`) arrives in
//! several shapes depending on which client wrote it:
//!
//! - the store's own timestamp object (`{ seconds, nanoseconds }`)
//! - an object carrying only seconds since the epoch
//! - an ISO-8601 string
//! - a raw date serialized as epoch milliseconds
//!
//! [`RawTimestamp`] captures every shape and [`RawTimestamp::normalize`]
//! turns it into a single `DateTime<Utc>`. Normalization never fails: a value
//! that matches no shape silently becomes the clock's current instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_traits::ToPrimitive;
use serde::de::IgnoredAny;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A timestamp value of unknown shape.
///
/// Variant order is the matching priority: deserialization tries each
/// variant top to bottom and keeps the first that fits.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Already a native instant.
    #[serde(skip_deserializing)]
    Native(DateTime<Utc>),
    /// The store's timestamp object.
    Timestamp {
        /// Whole seconds since the epoch.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// Sub-second part.
        #[serde(alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// An object with only a seconds field.
    Seconds {
        /// Seconds since the epoch, possibly fractional.
        #[serde(alias = "_seconds")]
        seconds: f64,
    },
    /// An ISO-8601 string.
    Text(String),
    /// Milliseconds since the epoch.
    EpochMillis(f64),
    /// Anything else.
    Unrecognized(IgnoredAny),
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Native(instant)
    }
}

/// Writes the store's timestamp object, or null when the value has no
/// instant.
impl Serialize for RawTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(instant) = self.to_instant() else {
            return serializer.serialize_none();
        };
        let mut state = serializer.serialize_struct("Timestamp", 2)?;
        state.serialize_field("seconds", &instant.timestamp())?;
        state.serialize_field("nanoseconds", &instant.timestamp_subsec_nanos())?;
        state.end()
    }
}

impl RawTimestamp {
    /// Converts the value to an instant, or `None` if it matches no shape.
    #[must_use]
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Native(instant) => Some(*instant),
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds),
            Self::Seconds { seconds } => from_fractional_seconds(*seconds),
            Self::Text(text) => parse_text(text),
            Self::EpochMillis(millis) => millis
                .round()
                .to_i64()
                .and_then(DateTime::from_timestamp_millis),
            Self::Unrecognized(_) => None,
        }
    }

    /// Converts the value to an instant, falling back to `clock.now()`.
    #[must_use]
    pub fn normalize(&self, clock: &dyn Clock) -> DateTime<Utc> {
        self.to_instant().unwrap_or_else(|| clock.now())
    }
}

/// Normalizes an optional timestamp field.
///
/// A missing field resolves to `fallback` (normally the record's creation
/// time), and to the current instant when there is no fallback either.
#[must_use]
pub fn normalize_or(
    raw: Option<&RawTimestamp>,
    fallback: Option<DateTime<Utc>>,
    clock: &dyn Clock,
) -> DateTime<Utc> {
    match raw {
        Some(raw) => raw.normalize(clock),
        None => fallback.unwrap_or_else(|| clock.now()),
    }
}

/// Normalizes a timestamp field that may legitimately be absent.
///
/// Absent stays `None`; present but unrecognized becomes the current instant.
#[must_use]
pub fn normalize_present(raw: Option<&RawTimestamp>, clock: &dyn Clock) -> Option<DateTime<Utc>> {
    raw.map(|raw| raw.normalize(clock))
}

fn from_fractional_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    let whole: f64 = seconds.floor();
    let nanos: u32 = ((seconds - whole) * 1_000_000_000.0)
        .round()
        .to_u32()?
        .min(999_999_999);
    DateTime::from_timestamp(whole.to_i64()?, nanos)
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text: &str = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
