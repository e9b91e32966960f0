//! `nextslot end-time`: compute when a single occurrence ends.

use chrono::NaiveTime;

use nextslot_core::compute_end;
use nextslot_core::time::parse_time_of_day;

use crate::error::ClientResult;

/// Prints the end time of an occurrence starting at `start`.
pub fn run(start: &str, minutes: i64) -> ClientResult<()> {
    let end = end_time(start, minutes)?;
    println!("{}", end.format("%H:%M:%S"));
    Ok(())
}

/// Parses `start` and adds `minutes` to it.
pub fn end_time(start: &str, minutes: i64) -> ClientResult<NaiveTime> {
    let start = parse_time_of_day(start)?;
    Ok(compute_end(start, minutes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use nextslot_core::ScheduleError;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn adds_minutes() {
        assert_eq!(end_time("09:00:00", 60).unwrap(), hms(10, 0, 0));
        assert_eq!(end_time("09:00:00", 12).unwrap(), hms(9, 12, 0));
        assert_eq!(end_time("08:55:00", 10).unwrap(), hms(9, 5, 0));
        assert_eq!(end_time("08:55", 10).unwrap(), hms(9, 5, 0));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            end_time("nine", 10),
            Err(ClientError::Schedule(ScheduleError::InvalidTimeFormat(_)))
        ));
        assert!(matches!(
            end_time("23:30:00", 60),
            Err(ClientError::Schedule(ScheduleError::InvalidDuration { .. }))
        ));
        assert!(matches!(
            end_time("09:00:00", 0),
            Err(ClientError::Schedule(ScheduleError::InvalidDuration { .. }))
        ));
    }
}
