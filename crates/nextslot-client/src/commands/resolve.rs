//! `nextslot resolve`: load meeting records and print their next occurrence.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, warn};

use nextslot_core::{
    Margin, MeetingRecord, MeetingRow, OccurrenceResolver, OutputFormat, OutputFormatter,
    ScheduleError, DEFAULT_MEETING_NAME,
};

use crate::cli::ResolveArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Accepted layouts for `--now`.
const NOW_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One element of the input, decoded on its own.
#[derive(Debug, Clone)]
pub enum RecordEntry {
    Record(MeetingRecord),
    /// The element is valid JSON but not a meeting record.
    Malformed {
        name: Option<String>,
        error: ScheduleError,
    },
}

impl RecordEntry {
    /// Decodes a single JSON element, keeping its name when one is readable.
    pub fn decode(value: Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        match serde_json::from_value::<MeetingRecord>(value) {
            Ok(record) => Self::Record(record),
            Err(err) => Self::Malformed {
                name,
                error: ScheduleError::InvalidRecord(err.to_string()),
            },
        }
    }

    /// Resolves the entry at `now`; malformed entries become invalid rows.
    pub fn resolve(&self, resolver: &OccurrenceResolver, now: NaiveDateTime) -> MeetingRow {
        match self {
            Self::Record(record) => MeetingRow::resolve(record, resolver, now),
            Self::Malformed { name, error } => {
                let name = name.as_deref().unwrap_or(DEFAULT_MEETING_NAME);
                warn!(meeting = name, error = %error, "invalid schedule");
                MeetingRow::invalid(name, error)
            }
        }
    }
}

/// Runs the resolve command, writing to stdout.
pub fn run(args: &ResolveArgs, config: &ClientConfig) -> ClientResult<()> {
    let records = load_records(&args.file)?;
    let now = parse_now(args.now.as_deref())?;
    let margin = Margin::minutes(args.margin.unwrap_or(config.resolver.margin_minutes))?;

    let mut options = config.display.format_options();
    if args.max_name_length.is_some() {
        options.max_name_length = args.max_name_length;
    }
    let formatter = OutputFormatter::new(options);

    debug!(
        records = records.len(),
        %now,
        margin = margin.as_minutes(),
        "resolving meetings"
    );
    let rows = resolve_rows(&records, &OccurrenceResolver::new(margin), now);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&rows, args.output_format(), &formatter, now, &mut out)
}

/// Reads records from `path`, or from stdin when `path` is `-`.
pub fn load_records(path: &Path) -> ClientResult<Vec<RecordEntry>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    parse_records(&content)
}

/// Parses a JSON array of records, or a single record object.
///
/// Only input that is not JSON at all is an error. Elements that fail to
/// decode as records are kept as [`RecordEntry::Malformed`].
pub fn parse_records(content: &str) -> ClientResult<Vec<RecordEntry>> {
    let entries = match serde_json::from_str::<Value>(content)? {
        Value::Array(values) => values.into_iter().map(RecordEntry::decode).collect(),
        value => vec![RecordEntry::decode(value)],
    };
    Ok(entries)
}

/// Parses the reference instant, defaulting to the local wall clock.
pub fn parse_now(value: Option<&str>) -> ClientResult<NaiveDateTime> {
    let Some(value) = value else {
        return Ok(Local::now().naive_local());
    };
    NOW_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            ClientError::Parse(format!(
                "invalid --now value {:?}, expected YYYY-MM-DDTHH:MM[:SS]",
                value
            ))
        })
}

/// Resolves every record at `now`; invalid records become invalid rows.
pub fn resolve_rows(
    records: &[RecordEntry],
    resolver: &OccurrenceResolver,
    now: NaiveDateTime,
) -> Vec<MeetingRow> {
    records
        .iter()
        .map(|entry| entry.resolve(resolver, now))
        .collect()
}

/// Writes rows in the requested format.
pub fn render(
    rows: &[MeetingRow],
    format: OutputFormat,
    formatter: &OutputFormatter,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> ClientResult<()> {
    match format {
        OutputFormat::Tty => {
            for line in formatter.format_tty_at(rows, now) {
                writeln!(out, "{}", line.text)?;
            }
        }
        OutputFormat::Json => {
            let output = formatter.format_json_at(rows, now);
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
