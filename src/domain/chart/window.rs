//! Time-window resolution: turns "last N candles" and "last 3 days" into
//! the absolute epoch-millisecond bounds the chart commands expect.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::SdkError;
use crate::shared::Period;
use crate::time::{
    epoch_millis, format_datetime, parse_datetime, to_milliseconds, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE,
};

/// An offset back from "now", e.g. `RelativeWindow::days(3)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeWindow {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl RelativeWindow {
    pub fn new(days: i64, hours: i64, minutes: i64) -> Self {
        Self {
            days,
            hours,
            minutes,
        }
    }

    pub fn days(days: i64) -> Self {
        Self::new(days, 0, 0)
    }

    pub fn hours(hours: i64) -> Self {
        Self::new(0, hours, 0)
    }

    pub fn minutes(minutes: i64) -> Self {
        Self::new(0, 0, minutes)
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }

    pub fn to_milliseconds(&self) -> i64 {
        to_milliseconds(self.days, self.hours, self.minutes)
    }

    /// [`Self::to_milliseconds`], or a `Validation` error if it overflows.
    pub fn checked_milliseconds(&self) -> Result<i64, SdkError> {
        self.days
            .checked_mul(MS_PER_DAY)
            .and_then(|ms| ms.checked_add(self.hours.checked_mul(MS_PER_HOUR)?))
            .and_then(|ms| ms.checked_add(self.minutes.checked_mul(MS_PER_MINUTE)?))
            .ok_or_else(|| out_of_range(self))
    }
}

fn out_of_range(window: &impl std::fmt::Debug) -> SdkError {
    SdkError::Validation(format!("Window {:?} is out of range", window))
}

/// Explicit or day-bounded window. Bounds use `MM/DD/YYYY HH:MM:SS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: Option<String>,
    pub end: Option<String>,
    /// Used only when `start` is absent and no candle count is requested.
    pub days: i64,
}

impl RangeWindow {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            days: 0,
        }
    }

    pub fn last_days(days: i64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn ending_at(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }
}

/// Minutes to look back for a "last N since" request.
///
/// With a count, twice the span of `desired_count` candles is requested:
/// asking for exactly N periods can return N-1 closed candles.
pub fn lookback_minutes(
    window: &RelativeWindow,
    period: Period,
    desired_count: usize,
) -> Result<i64, SdkError> {
    let extra = if desired_count > 0 {
        i64::try_from(desired_count)
            .ok()
            .and_then(|count| count.checked_mul(period.minutes() * 2))
    } else {
        Some(period.minutes())
    };
    extra
        .and_then(|extra| window.hours.checked_mul(60)?.checked_add(extra))
        .and_then(|minutes| minutes.checked_add(window.minutes))
        .ok_or_else(|| out_of_range(window))
}

/// `start` argument of a `getChartLastRequest`, measured back from server time.
pub fn recent_start(
    server_time: i64,
    window: &RelativeWindow,
    period: Period,
    desired_count: usize,
) -> Result<i64, SdkError> {
    let lookback = RelativeWindow::new(
        window.days,
        0,
        lookback_minutes(window, period, desired_count)?,
    );
    server_time
        .checked_sub(lookback.checked_milliseconds()?)
        .ok_or_else(|| out_of_range(window))
}

/// `(start, end)` arguments of a `getChartRangeRequest`.
///
/// `end` defaults to `now`; `start` defaults to `end - days` without a count,
/// or to `end - desired_count` periods with one.
pub fn resolve_range(
    window: &RangeWindow,
    period: Period,
    desired_count: usize,
    now: NaiveDateTime,
) -> Result<(i64, i64), SdkError> {
    let end = match &window.end {
        Some(text) => parse_datetime(text)?,
        None => now,
    };
    let start = match &window.start {
        Some(text) => parse_datetime(text)?,
        None => {
            let span = if desired_count == 0 {
                TimeDelta::try_days(window.days)
            } else {
                i64::try_from(desired_count)
                    .ok()
                    .and_then(|count| count.checked_mul(period.minutes()))
                    .and_then(TimeDelta::try_minutes)
            };
            span.and_then(|span| end.checked_sub_signed(span))
                .ok_or_else(|| out_of_range(window))?
        }
    };

    if epoch_millis(&start) > epoch_millis(&end) {
        return Err(SdkError::Validation(format!(
            "Window start {} is after end {}",
            format_datetime(&start),
            format_datetime(&end)
        )));
    }
    Ok((epoch_millis(&start), epoch_millis(&end)))
}
