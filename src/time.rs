//! Time utilities: wall clock, durations and the `MM/DD/YYYY HH:MM:SS`
//! boundary format.
//!
//! All textual datetimes are naive: they are converted to epoch milliseconds
//! as if they were UTC, with no offset applied anywhere. The broker's server
//! clock and the caller's textual times are assumed to already agree.

use std::time::Instant;

use chrono::{Local, NaiveDateTime, SubsecRound};
use thiserror::Error;

/// Textual datetime format accepted and produced at the API boundary.
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

pub(crate) const MS_PER_MINUTE: i64 = 60 * 1000;
pub(crate) const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub(crate) const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A datetime string that does not match [`DATE_FORMAT`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date format: {input}. Expected MM/DD/YYYY HH:MM:SS")]
pub struct FormatError {
    pub input: String,
}

/// Current local wall-clock time with microsecond precision.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Convert a duration to milliseconds. Negative components negate their share.
pub fn to_milliseconds(days: i64, hours: i64, minutes: i64) -> i64 {
    days * MS_PER_DAY + hours * MS_PER_HOUR + minutes * MS_PER_MINUTE
}

pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, FormatError> {
    NaiveDateTime::parse_from_str(input, DATE_FORMAT).map_err(|_| FormatError {
        input: input.to_string(),
    })
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Whole seconds since `1970-01-01 00:00:00`, in milliseconds.
pub fn epoch_millis(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp() * 1000
}

/// Parse a `MM/DD/YYYY HH:MM:SS` string into epoch milliseconds.
pub fn to_epoch_millis(input: &str) -> Result<i64, FormatError> {
    parse_datetime(input).map(|dt| epoch_millis(&dt))
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Source of time for the session and the candle resolver.
pub trait Clock: Send + Sync {
    /// Monotonic time, used for liveness comparisons.
    fn instant(&self) -> Instant;

    /// Local wall-clock time, used for default window ends.
    fn local_now(&self) -> NaiveDateTime;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        now()
    }
}
