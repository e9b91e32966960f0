//! Weekly hold patterns.
//!
//! A [`HoldPattern`] is a fixed set of seven flags, one per weekday, telling
//! which days of the week a repeating meeting is held on.
//!
//! Index 0 is **Sunday** and index 6 is Saturday. Display code maps indices
//! straight to the letters `S M T W T F S`, so this origin must not change.
//! `chrono::Weekday` is converted with [`Weekday::num_days_from_sunday`],
//! which uses the same origin.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Number of days in a week.
pub const DAYS_PER_WEEK: usize = 7;

/// Single-letter weekday labels, Sunday first.
pub const WEEKDAY_LETTERS: [char; DAYS_PER_WEEK] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

/// Which weekdays a repeating meeting is held on.
///
/// Serialized as an array of seven booleans, Sunday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldPattern([bool; DAYS_PER_WEEK]);

impl HoldPattern {
    /// A pattern with no day held.
    pub const fn none() -> Self {
        Self([false; DAYS_PER_WEEK])
    }

    /// A pattern holding every day of the week.
    pub const fn every_day() -> Self {
        Self([true; DAYS_PER_WEEK])
    }

    /// Creates a pattern from a 7-bit mask where bit `i` is weekday index `i`.
    ///
    /// Bits above the seventh are ignored.
    pub fn from_bits(bits: u8) -> Self {
        let mut days = [false; DAYS_PER_WEEK];
        for (i, day) in days.iter_mut().enumerate() {
            *day = bits & (1 << i) != 0;
        }
        Self(days)
    }

    /// Creates a pattern holding the given weekdays.
    pub fn from_weekdays(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days = [false; DAYS_PER_WEEK];
        for weekday in weekdays {
            days[index_of(weekday)] = true;
        }
        Self(days)
    }

    /// Creates a pattern from a slice, as received from the meeting API.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidPattern`] unless the slice holds
    /// exactly seven flags.
    pub fn from_slice(flags: &[bool]) -> ScheduleResult<Self> {
        let days: [bool; DAYS_PER_WEEK] = flags
            .try_into()
            .map_err(|_| ScheduleError::InvalidPattern(flags.len()))?;
        Ok(Self(days))
    }

    /// Returns the raw flags, index 0 = Sunday.
    pub fn days(&self) -> [bool; DAYS_PER_WEEK] {
        self.0
    }

    /// Returns `true` if the meeting is held on this weekday.
    pub fn is_held(&self, weekday: Weekday) -> bool {
        self.0[index_of(weekday)]
    }

    /// Returns `true` if no weekday is held.
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|held| *held)
    }

    /// Index of the earliest held weekday in the week (0 = Sunday).
    pub fn first_held(&self) -> Option<usize> {
        self.0.iter().position(|held| *held)
    }

    /// Number of days from `reference` to the next held weekday.
    ///
    /// The search runs forward from the reference weekday to Saturday. When
    /// nothing is held before the end of the week it wraps to the earliest
    /// held weekday of the following week, `7 + earliest - reference` days
    /// ahead. With `include_reference` the reference day itself counts and
    /// can yield `0`; without it the result is always in `1..=7`.
    ///
    /// Returns `None` for an empty pattern.
    pub fn days_until_next(&self, reference: Weekday, include_reference: bool) -> Option<u32> {
        let reference = index_of(reference);
        let from = if include_reference {
            reference
        } else {
            reference + 1
        };

        if let Some(offset) = self.0[from.min(DAYS_PER_WEEK)..]
            .iter()
            .position(|held| *held)
        {
            return Some((from + offset - reference) as u32);
        }

        self.first_held()
            .map(|earliest| (DAYS_PER_WEEK + earliest - reference) as u32)
    }
}

impl fmt::Display for HoldPattern {
    /// Renders held days as their letter and unheld days as `-`, e.g.
    /// `-M-W-F-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, held) in WEEKDAY_LETTERS.iter().zip(self.0) {
            if held {
                write!(f, "{letter}")?;
            } else {
                f.write_str("-")?;
            }
        }
        Ok(())
    }
}

/// Weekday index with Sunday = 0.
pub fn index_of(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_WEEKDAYS: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    mod indexing {
        use super::*;

        #[test]
        fn sunday_is_zero() {
            assert_eq!(index_of(Weekday::Sun), 0);
            assert_eq!(index_of(Weekday::Mon), 1);
            assert_eq!(index_of(Weekday::Sat), 6);
        }

        #[test]
        fn letters_follow_sunday_origin() {
            assert_eq!(WEEKDAY_LETTERS[index_of(Weekday::Sun)], 'S');
            assert_eq!(WEEKDAY_LETTERS[index_of(Weekday::Wed)], 'W');
            assert_eq!(WEEKDAY_LETTERS[index_of(Weekday::Fri)], 'F');
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn from_weekdays() {
            let pattern = HoldPattern::from_weekdays([Weekday::Fri, Weekday::Sun]);
            assert!(pattern.is_held(Weekday::Fri));
            assert!(pattern.is_held(Weekday::Sun));
            assert!(!pattern.is_held(Weekday::Sat));
            assert_eq!(pattern.days(), [true, false, false, false, false, true, false]);
        }

        #[test]
        fn from_bits_sets_matching_indices() {
            let pattern = HoldPattern::from_bits(0b010_0001);
            assert_eq!(pattern.days(), [true, false, false, false, false, true, false]);
            assert_eq!(HoldPattern::from_bits(0b111_1111), HoldPattern::every_day());
        }

        #[test]
        fn from_bits_ignores_high_bit() {
            assert_eq!(HoldPattern::from_bits(0x80), HoldPattern::none());
        }

        #[test]
        fn from_slice_requires_seven() {
            let pattern = HoldPattern::from_slice(&[true; 7]).unwrap();
            assert_eq!(pattern, HoldPattern::every_day());

            assert_eq!(
                HoldPattern::from_slice(&[true; 5]),
                Err(ScheduleError::InvalidPattern(5))
            );
            assert_eq!(
                HoldPattern::from_slice(&[]),
                Err(ScheduleError::InvalidPattern(0))
            );
        }

        #[test]
        fn empty() {
            assert!(HoldPattern::none().is_empty());
            assert!(HoldPattern::default().is_empty());
            assert!(!HoldPattern::from_weekdays([Weekday::Tue]).is_empty());
            assert_eq!(HoldPattern::none().first_held(), None);
        }

    }

    mod next_day {
        use super::*;

        #[test]
        fn forward_within_week() {
            let pattern = HoldPattern::from_weekdays([Weekday::Sat]);
            assert_eq!(pattern.days_until_next(Weekday::Fri, false), Some(1));
            assert_eq!(pattern.days_until_next(Weekday::Mon, false), Some(5));
        }

        #[test]
        fn wraps_to_earliest_next_week() {
            // Friday + Sunday, searching from Friday: Saturday isn't held,
            // so wrap to Sunday = 7 + 0 - 5.
            let pattern = HoldPattern::from_weekdays([Weekday::Fri, Weekday::Sun]);
            assert_eq!(pattern.days_until_next(Weekday::Fri, false), Some(2));

            let pattern = HoldPattern::from_weekdays([Weekday::Mon, Weekday::Tue]);
            assert_eq!(pattern.days_until_next(Weekday::Thu, false), Some(4));
        }

        #[test]
        fn only_reference_day_held() {
            let pattern = HoldPattern::from_weekdays([Weekday::Wed]);
            assert_eq!(pattern.days_until_next(Weekday::Wed, false), Some(7));
            assert_eq!(pattern.days_until_next(Weekday::Wed, true), Some(0));
        }

        #[test]
        fn saturday_reference_always_wraps() {
            let pattern = HoldPattern::from_weekdays([Weekday::Sat, Weekday::Tue]);
            assert_eq!(pattern.days_until_next(Weekday::Sat, false), Some(3));
        }

        #[test]
        fn empty_pattern_has_no_next() {
            assert_eq!(HoldPattern::none().days_until_next(Weekday::Mon, false), None);
            assert_eq!(HoldPattern::none().days_until_next(Weekday::Mon, true), None);
        }

        #[test]
        fn matches_naive_scan_for_every_pattern() {
            for bits in 0..128u8 {
                let pattern = HoldPattern::from_bits(bits);
                for reference in ALL_WEEKDAYS {
                    for include in [false, true] {
                        let start = if include { 0 } else { 1 };
                        let expected = (start..=7u32).find(|offset| {
                            pattern.days()[(index_of(reference) + *offset as usize) % 7]
                        });
                        assert_eq!(
                            pattern.days_until_next(reference, include),
                            expected,
                            "pattern {pattern} from {reference:?} include={include}"
                        );
                    }
                }
            }
        }
    }

    mod display {
        use super::*;

        #[test]
        fn renders_letters() {
            let pattern =
                HoldPattern::from_weekdays([Weekday::Mon, Weekday::Wed, Weekday::Fri]);
            assert_eq!(pattern.to_string(), "-M-W-F-");
            assert_eq!(HoldPattern::every_day().to_string(), "SMTWTFS");
            assert_eq!(HoldPattern::none().to_string(), "-------");
        }

        #[test]
        fn serde_as_array() {
            let pattern = HoldPattern::from_weekdays([Weekday::Sun, Weekday::Fri]);
            let json = serde_json::to_string(&pattern).unwrap();
            assert_eq!(json, "[true,false,false,false,false,true,false]");
            let parsed: HoldPattern = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, pattern);
        }
    }
}
