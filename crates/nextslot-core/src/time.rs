//! Time types for meeting schedules.
//!
//! This module provides [`MeetingWindow`] for the inclusive range of calendar
//! days a meeting series can occur on, [`DailySchedule`] for the start time
//! and duration shared by every occurrence, [`Margin`] for the trailing grace
//! period, and [`compute_end`] for bounding a single occurrence.
//!
//! Everything here is local calendar time. No time-zone normalization is
//! applied anywhere in the engine.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::{ScheduleError, ScheduleResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Default grace period after an occurrence's nominal end.
pub const DEFAULT_MARGIN_MINUTES: i64 = 30;

/// Largest accepted grace period.
///
/// Keeps the trailing margin of an occurrence from reaching past the day
/// after it was held.
pub const MAX_MARGIN_MINUTES: i64 = 12 * 60;

/// Adds `duration_minutes` to `start` within a single day.
///
/// `compute_end(09:00:00, 60)` is `10:00:00`; `compute_end(08:55:00, 10)`
/// is `09:05:00`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDuration`] when the duration is not
/// positive, or when the end would reach or pass midnight. Overnight
/// occurrences are not supported.
pub fn compute_end(start: NaiveTime, duration_minutes: i64) -> ScheduleResult<NaiveTime> {
    if duration_minutes <= 0 {
        return Err(ScheduleError::InvalidDuration {
            minutes: duration_minutes,
            reason: "must be positive",
        });
    }

    let past_midnight = ScheduleError::InvalidDuration {
        minutes: duration_minutes,
        reason: "occurrence would end past midnight",
    };
    if duration_minutes >= MINUTES_PER_DAY {
        return Err(past_midnight);
    }

    let (end, overflow) = start.overflowing_add_signed(Duration::minutes(duration_minutes));
    if overflow != 0 {
        return Err(past_midnight);
    }
    Ok(end)
}

/// Parses a time of day as `HH:MM:SS`, falling back to `HH:MM`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimeFormat`] if neither form matches.
pub fn parse_time_of_day(value: &str) -> ScheduleResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ScheduleError::InvalidTimeFormat(value.to_string()))
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] naming `field` if the value does
/// not parse.
pub fn parse_date(field: &'static str, value: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// The inclusive range of calendar days a meeting series can occur on.
///
/// A single (non-repeating) meeting has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeetingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl MeetingWindow {
    /// Creates a window from its first and last day.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWindow`] if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ScheduleResult<Self> {
        if end < start {
            return Err(ScheduleError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a one-day window for a single meeting.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` for a single, non-repeating meeting.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Checks if a date falls within the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Start time and duration shared by every occurrence of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DailySchedule {
    start: NaiveTime,
    duration_minutes: u32,
    end: NaiveTime,
}

impl DailySchedule {
    /// Creates a schedule, computing the end time once.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDuration`] as [`compute_end`] does.
    pub fn new(start: NaiveTime, duration_minutes: i64) -> ScheduleResult<Self> {
        let end = compute_end(start, duration_minutes)?;
        let duration_minutes =
            u32::try_from(duration_minutes).map_err(|_| ScheduleError::InvalidDuration {
                minutes: duration_minutes,
                reason: "out of range",
            })?;
        Ok(Self {
            start,
            duration_minutes,
            end,
        })
    }

    /// Time of day each occurrence starts.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Time of day each occurrence ends, on the same day it starts.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of each occurrence in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Length of each occurrence.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Trailing grace period during which a finished occurrence is still
/// considered joinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Margin(Duration);

impl Margin {
    /// Creates a margin from a number of minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidMargin`] outside
    /// `0..=MAX_MARGIN_MINUTES`.
    pub fn minutes(minutes: i64) -> ScheduleResult<Self> {
        if !(0..=MAX_MARGIN_MINUTES).contains(&minutes) {
            return Err(ScheduleError::InvalidMargin(minutes));
        }
        Ok(Self(Duration::minutes(minutes)))
    }

    /// No grace period at all.
    pub fn zero() -> Self {
        Self(Duration::zero())
    }

    /// The margin as a duration.
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// The margin in whole minutes.
    pub fn as_minutes(&self) -> i64 {
        self.0.num_minutes()
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self(Duration::minutes(DEFAULT_MARGIN_MINUTES))
    }
}
