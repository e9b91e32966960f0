//! Output formatting for meeting rows.
//!
//! This module renders [`MeetingRow`]s in two output formats:
//! - **TTY**: one human-readable line per meeting
//! - **JSON**: machine-readable output
//!
//! # Example
//!
//! ```rust
//! use nextslot_core::format::{FormatOptions, OutputFormatter};
//! use nextslot_core::MeetingRow;
//!
//! let formatter = OutputFormatter::new(FormatOptions::default());
//! let rows: Vec<MeetingRow> = Vec::new();
//! let now = chrono::NaiveDate::from_ymd_opt(2022, 6, 24)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! assert!(formatter.format_tty_at(&rows, now).is_empty());
//! assert_eq!(formatter.format_json_at(&rows, now).count, 0);
//! ```

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::row::{MeetingRow, RowStatus};

const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// The output format for meeting rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "02:30 PM").
    H12,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Maximum length for meeting names (truncated with ellipsis).
    pub max_name_length: Option<usize>,
    /// Hour separator character (e.g., ":", "h").
    pub hour_separator: String,
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Label for a series with no remaining occurrence.
    pub ended_text: String,
    /// Label for a record that failed validation.
    pub invalid_text: String,
    /// Suffix appended to rows whose "Join" action is enabled.
    pub join_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_name_length: None,
            hour_separator: ":".to_string(),
            time_format: TimeFormat::H24,
            ended_text: "Ended".to_string(),
            invalid_text: "Invalid schedule".to_string(),
            join_text: "[join]".to_string(),
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// One entry per meeting row, in input order.
    pub meetings: Vec<JsonMeeting>,
    /// Number of rows.
    pub count: usize,
    /// Number of rows whose "Join" action is enabled.
    pub joinable: usize,
}

/// A single meeting row in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMeeting {
    /// Meeting name (may be truncated).
    pub name: String,
    /// Row state.
    pub status: RowStatus,
    /// Whether the "Join" action is enabled.
    pub join_enabled: bool,
    /// Start of the relevant occurrence, ISO 8601 local time.
    pub start_time: Option<String>,
    /// Nominal end of the relevant occurrence, ISO 8601 local time.
    pub end_time: Option<String>,
    /// Formatted time string for display.
    pub time_display: String,
    /// Minutes until the occurrence starts (negative once started).
    pub minutes_until: Option<i64>,
    /// Weekday markers as text, e.g. `S----[F]-`.
    pub weekdays: String,
    /// Validation error for invalid rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A formatted row line with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    /// The formatted display text.
    pub text: String,
    /// The row state.
    pub status: RowStatus,
}

/// Output formatter for meeting rows.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// The options in use.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats rows for TTY output relative to `now`.
    pub fn format_tty_at(&self, rows: &[MeetingRow], now: NaiveDateTime) -> Vec<FormattedRow> {
        rows.iter().map(|row| self.format_row(row, now)).collect()
    }

    /// Formats rows as JSON output relative to `now`.
    pub fn format_json_at(&self, rows: &[MeetingRow], now: NaiveDateTime) -> JsonOutput {
        let meetings: Vec<JsonMeeting> = rows
            .iter()
            .map(|row| self.to_json_meeting(row, now))
            .collect();

        JsonOutput {
            count: meetings.len(),
            joinable: rows.iter().filter(|row| row.join_enabled).count(),
            meetings,
        }
    }

    /// Renders the weekday markers: held days by letter, the emphasized day
    /// in brackets, other days as `-`.
    pub fn format_markers(&self, row: &MeetingRow) -> String {
        let mut out = String::with_capacity(row.markers.len() + 2);
        for marker in &row.markers {
            if marker.emphasized {
                out.push('[');
                out.push(marker.letter);
                out.push(']');
            } else if marker.held {
                out.push(marker.letter);
            } else {
                out.push('-');
            }
        }
        out
    }

    /// Formats a single row.
    fn format_row(&self, row: &MeetingRow, now: NaiveDateTime) -> FormattedRow {
        let markers = self.format_markers(row);
        let name = self.truncate_name(&row.name);
        let when = self.format_when(row, now);

        let mut text = format!("{} {} - {}", markers, name, when);
        if row.join_enabled {
            text.push(' ');
            text.push_str(&self.options.join_text);
        }

        FormattedRow {
            text,
            status: row.status,
        }
    }

    /// Formats the time part of a row.
    fn format_when(&self, row: &MeetingRow, now: NaiveDateTime) -> String {
        match (row.status, row.next, row.end) {
            (RowStatus::Invalid, _, _) => match row.error {
                Some(ref error) => format!("{}: {}", self.options.invalid_text, error),
                None => self.options.invalid_text.clone(),
            },
            (RowStatus::InProgress, _, Some(end)) => {
                format!("In progress until {}", self.format_clock(end))
            }
            (RowStatus::Grace, _, Some(end)) => {
                format!("Running over since {}", self.format_clock(end))
            }
            (RowStatus::Upcoming, Some(start), _) => self.format_day_and_time(start, now),
            _ => self.options.ended_text.clone(),
        }
    }

    /// Formats an upcoming start with a day prefix relative to `now`.
    fn format_day_and_time(&self, start: NaiveDateTime, now: NaiveDateTime) -> String {
        let today = now.date();
        let day = if start.date() == today {
            Cow::Borrowed("Today")
        } else if Some(start.date()) == today.succ_opt() {
            Cow::Borrowed("Tomorrow")
        } else {
            Cow::Owned(start.format("%a %d %b").to_string())
        };
        format!("{} at {}", day, self.format_clock(start))
    }

    /// Formats a time of day using the configured format and separator.
    fn format_clock(&self, at: NaiveDateTime) -> String {
        let sep = &self.options.hour_separator;
        match self.options.time_format {
            TimeFormat::H24 => at.format(&format!("%H{}%M", sep)).to_string(),
            TimeFormat::H12 => at.format(&format!("%I{}%M %p", sep)).to_string(),
        }
    }

    /// Truncates a name to the configured maximum length.
    fn truncate_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if let Some(max_len) = self.options.max_name_length {
            ellipsis(name, max_len)
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Converts a MeetingRow to JsonMeeting.
    fn to_json_meeting(&self, row: &MeetingRow, now: NaiveDateTime) -> JsonMeeting {
        JsonMeeting {
            name: self.truncate_name(&row.name).into_owned(),
            status: row.status,
            join_enabled: row.join_enabled,
            start_time: row.next.map(|t| t.format(ISO_DATETIME).to_string()),
            end_time: row.end.map(|t| t.format(ISO_DATETIME).to_string()),
            time_display: self.format_when(row, now),
            minutes_until: row.minutes_until_start(now),
            weekdays: self.format_markers(row),
            error: row.error.clone(),
        }
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    let char_count = s.chars().count();
    if char_count <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}


#[cfg(test)]
mod golden_tests;
