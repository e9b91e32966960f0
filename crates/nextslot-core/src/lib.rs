//! Core types: hold patterns, occurrence resolution, end times, formatting

pub mod error;
pub mod format;
pub mod pattern;
pub mod record;
pub mod resolver;
pub mod row;
pub mod schedule;
pub mod time;
pub mod tracing;

pub use error::{ScheduleError, ScheduleResult};
pub use format::{
    ellipsis, FormatOptions, FormattedRow, JsonMeeting, JsonOutput, OutputFormat, OutputFormatter,
    TimeFormat,
};
pub use pattern::HoldPattern;
pub use record::{MeetingRecord, DEFAULT_MEETING_NAME};
pub use resolver::{resolve, Occurrence, OccurrenceResolver};
pub use row::{MeetingRow, RowStatus, WeekdayMarker};
pub use schedule::{MeetingSchedule, Slot};
pub use time::{compute_end, DailySchedule, Margin, MeetingWindow};
pub use crate::tracing::{init_tracing, TracingConfig, TracingError};
