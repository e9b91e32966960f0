//! Validated meeting definitions.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::pattern::HoldPattern;
use crate::time::{DailySchedule, Margin, MeetingWindow};

/// The start and end instant of one concrete occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    /// When the occurrence starts.
    pub start: NaiveDateTime,
    /// When the occurrence nominally ends (before any grace margin).
    pub end: NaiveDateTime,
}

impl Slot {
    /// The end plus the grace margin, saturating at the last representable
    /// instant.
    pub fn grace_end(&self, margin: Margin) -> NaiveDateTime {
        self.end
            .checked_add_signed(margin.as_duration())
            .unwrap_or(NaiveDateTime::MAX)
    }
}

/// A meeting series: the window it runs in, the weekdays it is held on and
/// the daily start time and duration.
///
/// Every part has been validated, so resolving occurrences from a
/// `MeetingSchedule` cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeetingSchedule {
    window: MeetingWindow,
    pattern: HoldPattern,
    daily: DailySchedule,
}

impl MeetingSchedule {
    /// Creates a schedule from already validated parts.
    pub fn new(window: MeetingWindow, pattern: HoldPattern, daily: DailySchedule) -> Self {
        Self {
            window,
            pattern,
            daily,
        }
    }

    /// Creates a single, non-repeating meeting on `date`.
    ///
    /// The hold pattern is left empty; single meetings never consult it.
    pub fn single(date: NaiveDate, daily: DailySchedule) -> Self {
        Self::new(MeetingWindow::single(date), HoldPattern::none(), daily)
    }

    /// The calendar window of the series.
    pub fn window(&self) -> MeetingWindow {
        self.window
    }

    /// The weekly hold pattern.
    pub fn pattern(&self) -> HoldPattern {
        self.pattern
    }

    /// The daily start time and duration.
    pub fn daily(&self) -> DailySchedule {
        self.daily
    }

    /// Returns `true` if this is a single meeting.
    pub fn is_single(&self) -> bool {
        self.window.is_single()
    }

    /// Returns `true` if a repeating meeting has an occurrence on `date`.
    pub fn is_held_on(&self, date: NaiveDate) -> bool {
        self.window.contains(date) && self.pattern.is_held(date.weekday())
    }

    /// The occurrence that would take place on `date`.
    ///
    /// Neither the window nor the pattern is checked.
    pub fn slot_on(&self, date: NaiveDate) -> Slot {
        Slot {
            start: date.and_time(self.daily.start()),
            end: date.and_time(self.daily.end()),
        }
    }
}
