//! Display state for a meeting row.
//!
//! List views show one row per meeting: a "Join" action that is enabled only
//! while the occurrence can be joined, an "Ended" label once the series is
//! over, and seven weekday markers of which the active one is emphasized.
//! [`MeetingRow`] derives all of that from an [`Occurrence`] so the view
//! layer only has to render it.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::pattern::{index_of, DAYS_PER_WEEK, WEEKDAY_LETTERS};
use crate::record::MeetingRecord;
use crate::resolver::{Occurrence, OccurrenceResolver};
use crate::schedule::MeetingSchedule;

/// The state a meeting row is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// The next occurrence has not started yet.
    Upcoming,
    /// The occurrence is running.
    InProgress,
    /// The occurrence is over but still inside its grace margin.
    Grace,
    /// The series has no remaining occurrence.
    Ended,
    /// The record could not be turned into a schedule.
    Invalid,
}

impl RowStatus {
    /// Derives the status from a resolved occurrence.
    pub fn from_occurrence(occurrence: &Occurrence) -> Self {
        if occurrence.is_ended() {
            Self::Ended
        } else if occurrence.in_progress {
            Self::InProgress
        } else if occurrence.maybe_in_progress {
            Self::Grace
        } else {
            Self::Upcoming
        }
    }

    /// Returns the machine-readable name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Grace => "grace",
            Self::Ended => "ended",
            Self::Invalid => "invalid",
        }
    }
}

/// One of the seven weekday letters shown on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekdayMarker {
    /// The weekday letter (`S M T W T F S`).
    pub letter: char,
    /// The meeting is held on this weekday.
    pub held: bool,
    /// This is the weekday of the occurrence that can be joined right now.
    pub emphasized: bool,
}

/// A display-ready meeting row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRow {
    /// The meeting name.
    pub name: String,
    /// The row state.
    pub status: RowStatus,
    /// Whether the "Join" action is enabled.
    pub join_enabled: bool,
    /// Start of the relevant occurrence.
    pub next: Option<NaiveDateTime>,
    /// Nominal end of the relevant occurrence.
    pub end: Option<NaiveDateTime>,
    /// Weekday markers, Sunday first.
    pub markers: [WeekdayMarker; DAYS_PER_WEEK],
    /// Why the schedule is invalid, for [`RowStatus::Invalid`] rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MeetingRow {
    /// Builds a row from an occurrence resolved at `now`.
    ///
    /// A single meeting has no hold pattern, so its own weekday is marked as
    /// held instead. An occurrence that already started but can no longer
    /// be joined is shown as ended.
    pub fn from_occurrence(
        name: impl Into<String>,
        schedule: &MeetingSchedule,
        occurrence: Occurrence,
        now: NaiveDateTime,
    ) -> Self {
        let occurrence = match occurrence.next {
            Some(start) if start < now && !occurrence.is_joinable() => Occurrence::ended(),
            _ => occurrence,
        };

        let held = if schedule.is_single() {
            let mut days = [false; DAYS_PER_WEEK];
            days[index_of(schedule.window().start().weekday())] = true;
            days
        } else {
            schedule.pattern().days()
        };

        let active = occurrence
            .next
            .filter(|_| occurrence.is_joinable())
            .map(|start| index_of(start.weekday()));

        let markers = std::array::from_fn(|i| WeekdayMarker {
            letter: WEEKDAY_LETTERS[i],
            held: held[i],
            emphasized: held[i] && active == Some(i),
        });

        Self {
            name: name.into(),
            status: RowStatus::from_occurrence(&occurrence),
            join_enabled: occurrence.is_joinable(),
            next: occurrence.next,
            end: occurrence
                .next
                .map(|start| schedule.slot_on(start.date()).end),
            markers,
            error: None,
        }
    }

    /// Builds the row shown for a record that failed validation.
    pub fn invalid(name: impl Into<String>, error: &ScheduleError) -> Self {
        Self {
            name: name.into(),
            status: RowStatus::Invalid,
            join_enabled: false,
            next: None,
            end: None,
            markers: WEEKDAY_LETTERS.map(|letter| WeekdayMarker {
                letter,
                held: false,
                emphasized: false,
            }),
            error: Some(error.to_string()),
        }
    }

    /// Validates `record` and resolves it at `now`.
    ///
    /// Invalid records produce an [`RowStatus::Invalid`] row rather than a
    /// computed occurrence.
    pub fn resolve(
        record: &MeetingRecord,
        resolver: &OccurrenceResolver,
        now: NaiveDateTime,
    ) -> Self {
        match record.to_schedule() {
            Ok(schedule) => {
                let occurrence = resolver.resolve(&schedule, now);
                Self::from_occurrence(record.display_name(), &schedule, occurrence, now)
            }
            Err(err) => {
                tracing::warn!(meeting = record.display_name(), error = %err, "invalid schedule");
                Self::invalid(record.display_name(), &err)
            }
        }
    }

    /// Returns minutes until the occurrence starts from `now`.
    ///
    /// Negative once it has started; `None` when there is no occurrence.
    pub fn minutes_until_start(&self, now: NaiveDateTime) -> Option<i64> {
        self.next.map(|start| (start - now).num_minutes())
    }

    /// Returns the emphasized marker, if any.
    pub fn emphasized_marker(&self) -> Option<&WeekdayMarker> {
        self.markers.iter().find(|m| m.emphasized)
    }
}
