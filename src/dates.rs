//! Ranged dates and Baseline date arithmetic
//!
//! Baseline dates are `YYYY-MM-DD` strings with an optional `≤` marker
//! meaning "at or before this date; earlier boundary unknown". The marker
//! travels with the date through keystone selection and status derivation.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use thiserror::Error;

use crate::version::RANGED_PREFIX;

/// Calendar months between a feature's low date and its high date
pub const LOW_TO_HIGH_MONTHS: u32 = 30;

/// A UTC calendar date with an optional `≤` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangedDate {
    pub date: NaiveDate,
    pub ranged: bool,
}

/// Error type for ranged date parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("invalid date string: {0}")]
    Invalid(String),
}

impl RangedDate {
    pub fn new(date: NaiveDate, ranged: bool) -> Self {
        Self { date, ranged }
    }

    /// The date 30 calendar months later, day-of-month clamped, keeping
    /// the ranged marker. `None` only if the result would overflow the
    /// representable date range.
    pub fn high_date(&self) -> Option<RangedDate> {
        self.date
            .checked_add_months(Months::new(LOW_TO_HIGH_MONTHS))
            .map(|date| RangedDate {
                date,
                ranged: self.ranged,
            })
    }
}

impl FromStr for RangedDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw, ranged) = match s.strip_prefix(RANGED_PREFIX) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| DateParseError::Invalid(s.to_string()))?;
        Ok(Self { date, ranged })
    }
}

impl fmt::Display for RangedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranged {
            write!(f, "{RANGED_PREFIX}{}", self.date.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.date.format("%Y-%m-%d"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2023-01-15", date(2023, 1, 15), false)]
    #[case("≤2023-01-15", date(2023, 1, 15), true)]
    #[case("≤2020-12-31", date(2020, 12, 31), true)]
    fn ranged_date_parses_both_shapes(
        #[case] input: &str,
        #[case] expected: NaiveDate,
        #[case] ranged: bool,
    ) {
        let parsed: RangedDate = input.parse().unwrap();
        assert_eq!(parsed.date, expected);
        assert_eq!(parsed.ranged, ranged);
    }

    #[rstest]
    #[case("2023-01-15")]
    #[case("≤2023-01-15")]
    fn ranged_date_display_round_trips(#[case] input: &str) {
        let parsed: RangedDate = input.parse().unwrap();
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("2023-13-01")]
    #[case("2023/01/01")]
    #[case("≤")]
    #[case("someday")]
    fn ranged_date_rejects_malformed_strings(#[case] input: &str) {
        assert!(input.parse::<RangedDate>().is_err());
    }

    #[rstest]
    #[case(date(2023, 1, 15), date(2025, 7, 15))]
    #[case(date(2020, 3, 1), date(2022, 9, 1))]
    // 30 months from Dec 31 lands in June, which has no day 31
    #[case(date(2019, 12, 31), date(2022, 6, 30))]
    fn high_date_adds_thirty_calendar_months(#[case] low: NaiveDate, #[case] expected: NaiveDate) {
        let high = RangedDate::new(low, false).high_date().unwrap();
        assert_eq!(high.date, expected);
        assert!(!high.ranged);
    }

    #[test]
    fn high_date_keeps_ranged_marker() {
        let high = RangedDate::new(date(2023, 1, 15), true).high_date().unwrap();
        assert!(high.ranged);
        assert_eq!(high.to_string(), "≤2025-07-15");
    }
}
