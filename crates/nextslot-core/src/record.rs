//! Meeting records as delivered by the meeting API.
//!
//! A [`MeetingRecord`] mirrors the JSON payload field for field, with dates
//! and times still as strings. [`MeetingRecord::to_schedule`] is the one
//! place where those strings are parsed and validated; everything downstream
//! works with the typed [`MeetingSchedule`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScheduleResult;
use crate::pattern::HoldPattern;
use crate::schedule::MeetingSchedule;
use crate::time::{parse_date, parse_time_of_day, DailySchedule, MeetingWindow};

/// Name shown for records that do not carry one.
pub const DEFAULT_MEETING_NAME: &str = "Meeting";

/// A raw meeting record.
///
/// ```json
/// {
///   "name": "Weekly sync",
///   "start_date": "2022-04-24",
///   "end_date": "2022-07-24",
///   "start_time": "11:00:00",
///   "duration": 120,
///   "hold_pattern": [true, false, false, false, false, true, false]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Display name of the meeting, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First day of the window, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day of the window, `YYYY-MM-DD`.
    pub end_date: String,
    /// Daily start time, `HH:MM:SS`.
    pub start_time: String,
    /// Duration of each occurrence in minutes.
    pub duration: i64,
    /// Seven flags, index 0 = Sunday. Missing means no day is held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_pattern: Option<Vec<bool>>,
}

impl MeetingRecord {
    /// Creates a record from raw field values.
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        start_time: impl Into<String>,
        duration: i64,
    ) -> Self {
        Self {
            name: None,
            start_date: start_date.into(),
            end_date: end_date.into(),
            start_time: start_time.into(),
            duration,
            hold_pattern: None,
        }
    }

    /// Builder method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set the hold pattern.
    pub fn with_hold_pattern(mut self, pattern: impl Into<Vec<bool>>) -> Self {
        self.hold_pattern = Some(pattern.into());
        self
    }

    /// Display name, falling back to [`DEFAULT_MEETING_NAME`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_MEETING_NAME)
    }

    /// Parses and validates the record.
    ///
    /// For a single meeting (same start and end date) the hold pattern is
    /// not consulted, so a malformed one is not an error.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`](crate::ScheduleError) found, in
    /// field order: dates, window, start time, duration, hold pattern.
    pub fn to_schedule(&self) -> ScheduleResult<MeetingSchedule> {
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        let window = MeetingWindow::new(start, end)?;
        let time = parse_time_of_day(&self.start_time)?;
        let daily = DailySchedule::new(time, self.duration)?;

        let pattern = match &self.hold_pattern {
            _ if window.is_single() => HoldPattern::none(),
            Some(flags) => HoldPattern::from_slice(flags)?,
            None => HoldPattern::none(),
        };

        debug!(
            meeting = self.display_name(),
            %start,
            %end,
            %pattern,
            "parsed meeting record"
        );
        Ok(MeetingSchedule::new(window, pattern, daily))
    }
}

impl TryFrom<&MeetingRecord> for MeetingSchedule {
    type Error = crate::error::ScheduleError;

    fn try_from(record: &MeetingRecord) -> ScheduleResult<Self> {
        record.to_schedule()
    }
}
