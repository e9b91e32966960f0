//! Golden tests for output formatting.
//!
//! These tests use insta inline snapshots to keep the output format stable.
//! Run with `cargo insta review` to update them after intentional changes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::format::{FormatOptions, OutputFormatter, TimeFormat};
use crate::record::MeetingRecord;
use crate::resolver::OccurrenceResolver;
use crate::row::MeetingRow;

const FRIDAY: [bool; 7] = [false, false, false, false, false, true, false];

/// Friday 2022-06-24 at noon.
fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 6, 24)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn weekly(name: &str, start_time: &str, duration: i64, pattern: [bool; 7]) -> MeetingRecord {
    MeetingRecord::new("2022-04-24", "2022-07-24", start_time, duration)
        .with_name(name)
        .with_hold_pattern(pattern)
}

fn rows(records: &[MeetingRecord]) -> Vec<MeetingRow> {
    let resolver = OccurrenceResolver::default();
    records
        .iter()
        .map(|record| MeetingRow::resolve(record, &resolver, reference_time()))
        .collect()
}

fn render(formatter: &OutputFormatter, records: &[MeetingRecord]) -> String {
    formatter
        .format_tty_at(&rows(records), reference_time())
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn mixed_records() -> Vec<MeetingRecord> {
    vec![
        weekly(
            "Weekly sync",
            "11:00:00",
            120,
            [true, false, false, false, false, true, false],
        ),
        weekly("Retro", "11:00:00", 45, FRIDAY),
        weekly("Standup", "16:00:00", 60, FRIDAY),
        weekly(
            "Planning",
            "10:00:00",
            60,
            [false, false, false, false, false, false, true],
        ),
        weekly(
            "1:1",
            "09:00:00",
            30,
            [false, true, false, true, false, false, false],
        ),
        MeetingRecord::new("2022-04-01", "2022-06-01", "10:00:00", 60)
            .with_name("Old review")
            .with_hold_pattern([false, false, false, true, false, false, false]),
        MeetingRecord::new("2022-07-01", "2022-07-01", "09:00:00", 30).with_name("Kickoff"),
        MeetingRecord::new("2022-07-04", "2022-08-31", "14:00:00", 90)
            .with_name("Onboarding")
            .with_hold_pattern([false, false, true, false, false, false, false]),
        weekly("Broken", "11:00:00", 60, FRIDAY).with_hold_pattern(vec![true, false, true]),
    ]
}

#[test]
fn golden_tty_empty() {
    let output = render(&OutputFormatter::with_defaults(), &[]);
    insta::assert_snapshot!(output, @"");
}

#[test]
fn golden_tty_mixed_rows() {
    let output = render(&OutputFormatter::with_defaults(), &mixed_records());
    insta::assert_snapshot!(output, @r"
S----[F]- Weekly sync - In progress until 13:00 [join]
-----[F]- Retro - Running over since 11:45 [join]
-----F- Standup - Today at 16:00
------S Planning - Tomorrow at 10:00
-M-W--- 1:1 - Mon 27 Jun at 09:00
---W--- Old review - Ended
-----F- Kickoff - Fri 01 Jul at 09:00
--T---- Onboarding - Tue 05 Jul at 14:00
------- Broken - Invalid schedule: invalid hold pattern: expected 7 weekdays, got 3
");
}

#[test]
fn golden_tty_twelve_hour() {
    let formatter = OutputFormatter::new(FormatOptions {
        time_format: TimeFormat::H12,
        ..Default::default()
    });
    let output = render(
        &formatter,
        &[
            weekly("Standup", "16:00:00", 60, FRIDAY),
            weekly("Retro", "11:00:00", 45, FRIDAY),
        ],
    );
    insta::assert_snapshot!(output, @r"
-----F- Standup - Today at 04:00 PM
-----[F]- Retro - Running over since 11:45 AM [join]
");
}

#[test]
fn golden_tty_custom_labels() {
    let formatter = OutputFormatter::new(FormatOptions {
        ended_text: "Finished".to_string(),
        invalid_text: "Bad data".to_string(),
        join_text: "<join>".to_string(),
        max_name_length: Some(10),
        ..Default::default()
    });
    let output = render(
        &formatter,
        &[
            MeetingRecord::new("2022-04-01", "2022-06-01", "10:00:00", 60)
                .with_name("Quarterly business review")
                .with_hold_pattern(FRIDAY),
            MeetingRecord::new("2022-04-24", "2022-07-24", "25:00:00", 60).with_name("Typo"),
            weekly("Retro", "11:00:00", 45, FRIDAY),
        ],
    );
    insta::assert_snapshot!(output, @r#"
-----F- Quarter... - Finished
------- Typo - Bad data: invalid start time: "25:00:00" is not HH:MM:SS
-----[F]- Retro - Running over since 11:45 <join>
"#);
}

#[test]
fn golden_json_single_upcoming() {
    let formatter = OutputFormatter::with_defaults();
    let output = formatter.format_json_at(
        &rows(&[weekly("Standup", "16:00:00", 60, FRIDAY)]),
        reference_time(),
    );
    insta::assert_json_snapshot!(output, @r#"
{
  "meetings": [
    {
      "name": "Standup",
      "status": "upcoming",
      "join_enabled": false,
      "start_time": "2022-06-24T16:00:00",
      "end_time": "2022-06-24T17:00:00",
      "time_display": "Today at 16:00",
      "minutes_until": 240,
      "weekdays": "-----F-"
    }
  ],
  "count": 1,
  "joinable": 0
}
"#);
}

#[test]
fn golden_json_invalid_row() {
    let formatter = OutputFormatter::with_defaults();
    let output = formatter.format_json_at(
        &rows(&[MeetingRecord::new("2022-07-24", "2022-04-24", "11:00:00", 60).with_name("Backwards")]),
        reference_time(),
    );
    insta::assert_json_snapshot!(output, @r#"
{
  "meetings": [
    {
      "name": "Backwards",
      "status": "invalid",
      "join_enabled": false,
      "start_time": null,
      "end_time": null,
      "time_display": "Invalid schedule: invalid window: end date 2022-04-24 is before start date 2022-07-24",
      "minutes_until": null,
      "weekdays": "-------",
      "error": "invalid window: end date 2022-04-24 is before start date 2022-07-24"
    }
  ],
  "count": 1,
  "joinable": 0
}
"#);
}
