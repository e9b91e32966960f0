//! Validation errors raised at the schedule boundary.
//!
//! The resolver itself never fails; every error in this module is produced
//! while turning external values (strings from the meeting API, numbers from
//! configuration) into the typed model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for schedule construction.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// An error produced while building a meeting schedule from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The window ends before it starts.
    #[error("invalid window: end date {end} is before start date {start}")]
    InvalidWindow {
        /// First calendar day of the window.
        start: NaiveDate,
        /// Last calendar day of the window.
        end: NaiveDate,
    },

    /// A date field is not an ISO-8601 calendar date.
    #[error("invalid {field}: {value:?} is not a YYYY-MM-DD date")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// The start time is not a time of day.
    #[error("invalid start time: {0:?} is not HH:MM:SS")]
    InvalidTimeFormat(String),

    /// The duration is zero, negative, or carries the end past midnight.
    #[error("invalid duration of {minutes} minutes: {reason}")]
    InvalidDuration {
        /// The raw duration in minutes.
        minutes: i64,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The grace margin is outside the supported range.
    #[error("invalid margin of {0} minutes: must be between 0 and 720")]
    InvalidMargin(i64),

    /// The hold pattern does not have exactly one entry per weekday.
    #[error("invalid hold pattern: expected 7 weekdays, got {0}")]
    InvalidPattern(usize),

    /// The payload does not have the shape of a meeting record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
