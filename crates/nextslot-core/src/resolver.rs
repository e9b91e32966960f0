//! Next-occurrence resolution.
//!
//! [`OccurrenceResolver`] answers, for a meeting series and a reference
//! instant, which concrete occurrence is relevant right now and whether it is
//! running. The reference instant is always passed in; the resolver never
//! reads a clock, so the same inputs always give the same [`Occurrence`].
//!
//! The decision runs in this order:
//!
//! 1. If `now` is past the last possible end of the series (last window day,
//!    plus duration, plus margin) the series is over.
//! 2. A single meeting (one-day window) always resolves to that day,
//!    ignoring the hold pattern.
//! 3. An occurrence that started on a held day and whose end plus margin is
//!    still ahead of `now` is returned with its activity flags. This is
//!    normally today's occurrence; a previous day's occurrence whose margin
//!    runs past midnight comes first.
//! 4. Otherwise the nearest held weekday after the reference date is picked,
//!    wrapping into the following week, as long as it is inside the window.
//!
//! Every step is a constant amount of work; the window is never scanned day
//! by day.

use chrono::{Datelike, Days, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::schedule::{MeetingSchedule, Slot};
use crate::time::Margin;

/// The occurrence relevant at a reference instant.
///
/// `in_progress` implies `maybe_in_progress`, and both are `false` whenever
/// `next` is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    /// Start of the relevant occurrence, or `None` once the series is over.
    pub next: Option<NaiveDateTime>,
    /// The occurrence has started and has not reached its nominal end.
    pub in_progress: bool,
    /// The occurrence has started and has not reached its end plus margin.
    pub maybe_in_progress: bool,
}

impl Occurrence {
    /// The result for a series with no remaining occurrence.
    pub const fn ended() -> Self {
        Self {
            next: None,
            in_progress: false,
            maybe_in_progress: false,
        }
    }

    /// A future occurrence starting at `start`.
    pub const fn upcoming(start: NaiveDateTime) -> Self {
        Self {
            next: Some(start),
            in_progress: false,
            maybe_in_progress: false,
        }
    }

    /// The occurrence `slot`, with flags evaluated at `now`.
    ///
    /// Both bounds are exclusive: at the exact start instant nothing is in
    /// progress yet, and at the exact end (or end plus margin) it no longer is.
    pub fn at(slot: Slot, now: NaiveDateTime, margin: Margin) -> Self {
        let started = slot.start < now;
        Self {
            next: Some(slot.start),
            in_progress: started && now < slot.end,
            maybe_in_progress: started && now < slot.grace_end(margin),
        }
    }

    /// Returns `true` if the series has no remaining occurrence.
    pub fn is_ended(&self) -> bool {
        self.next.is_none()
    }

    /// Returns `true` if the occurrence can be joined at the reference
    /// instant (running, or inside its grace margin).
    pub fn is_joinable(&self) -> bool {
        self.maybe_in_progress
    }
}

/// Resolves the next relevant occurrence of a meeting series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceResolver {
    margin: Margin,
}

impl OccurrenceResolver {
    /// Creates a resolver with the given trailing grace margin.
    pub fn new(margin: Margin) -> Self {
        Self { margin }
    }

    /// The grace margin applied after each occurrence.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Resolves `meeting` at the reference instant `now`.
    pub fn resolve(&self, meeting: &MeetingSchedule, now: NaiveDateTime) -> Occurrence {
        let window = meeting.window();

        let last_end = meeting.slot_on(window.end()).grace_end(self.margin);
        if now > last_end {
            trace!(%now, %last_end, "series is over");
            return Occurrence::ended();
        }

        if window.is_single() {
            trace!(%now, "single meeting");
            return Occurrence::at(meeting.slot_on(window.start()), now, self.margin);
        }

        let pattern = meeting.pattern();
        if pattern.is_empty() {
            trace!(%now, "no weekday held");
            return Occurrence::ended();
        }

        let today = now.date();
        let candidates = [today.pred_opt(), Some(today)];
        for date in candidates.into_iter().flatten() {
            if !meeting.is_held_on(date) {
                continue;
            }
            let slot = meeting.slot_on(date);
            if now < slot.grace_end(self.margin) {
                trace!(%now, %date, "occurrence still joinable");
                return Occurrence::at(slot, now, self.margin);
            }
        }

        // Today was fully handled above, so the search starts the day after
        // it. A window that has not opened yet is searched from its first
        // day, which may itself be held.
        let (reference, include_reference) = if window.start() > today {
            (window.start(), true)
        } else {
            (today, false)
        };

        let next_date = pattern
            .days_until_next(reference.weekday(), include_reference)
            .and_then(|days| reference.checked_add_days(Days::new(u64::from(days))));

        match next_date {
            Some(date) if date <= window.end() => {
                trace!(%now, %reference, %date, "next held weekday");
                Occurrence::upcoming(meeting.slot_on(date).start)
            }
            _ => {
                trace!(%now, %reference, "no held weekday left in window");
                Occurrence::ended()
            }
        }
    }
}

/// Resolves `meeting` at `now` with the default 30-minute margin.
pub fn resolve(meeting: &MeetingSchedule, now: NaiveDateTime) -> Occurrence {
    OccurrenceResolver::default().resolve(meeting, now)
}
