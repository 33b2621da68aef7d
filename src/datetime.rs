//! Date arithmetic used by the grid engine.
//!
//! The engine only ever talks to a [`DateArithmetic`] implementation, so the
//! calendar backend can be swapped out in tests. [`Gregorian`] is the default
//! backend and is built on `chrono::NaiveDate`, which carries no time zone or
//! locale and therefore gives the same answer on every machine.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt::Debug;

use crate::error::{Error, ErrorKind, Result};

/// Calendar fields of a single date.
///
/// `weekday` counts from Sunday: 1 = Sunday, 7 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub weekday: u32,
}

pub trait DateArithmetic {
    type Date: Copy + Ord + Debug;

    fn date(&self, year: i32, month: u32, day: u32) -> Result<Self::Date>;
    fn add_days(&self, date: Self::Date, days: i64) -> Result<Self::Date>;
    fn components_of(&self, date: Self::Date) -> DateComponents;
    fn days_in_month(&self, year: i32, month: u32) -> Result<u32>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl DateArithmetic for Gregorian {
    type Date = NaiveDate;

    fn date(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidArgument,
                &format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
            )
        })
    }

    fn add_days(&self, date: NaiveDate, days: i64) -> Result<NaiveDate> {
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days as u64))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };

        shifted.ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidArgument,
                &format!("{} {:+} days is out of range", date, days),
            )
        })
    }

    fn components_of(&self, date: NaiveDate) -> DateComponents {
        DateComponents {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().number_from_sunday(),
        }
    }

    fn days_in_month(&self, year: i32, month: u32) -> Result<u32> {
        days_of_month(year, month).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidArgument,
                &format!("no month {} in year {}", month, year),
            )
        })
    }
}

pub fn days_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Some(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_counts_from_sunday() {
        let cal = Gregorian;
        let sunday = cal.date(2025, 11, 23).unwrap();
        let saturday = cal.date(2026, 1, 10).unwrap();

        assert_eq!(cal.components_of(sunday).weekday, 1);
        assert_eq!(cal.components_of(saturday).weekday, 7);
    }

    #[test]
    fn days_in_february() {
        let cal = Gregorian;
        assert_eq!(cal.days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(cal.days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(cal.days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(cal.days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(cal.days_in_month(2025, 12).unwrap(), 31);
        assert_eq!(cal.days_in_month(2025, 4).unwrap(), 30);
    }

    #[test]
    fn nonexistent_dates_are_rejected() {
        let cal = Gregorian;
        assert!(cal.date(2025, 2, 29).unwrap_err().is_invalid_argument());
        assert!(cal.date(2025, 13, 1).unwrap_err().is_invalid_argument());
        assert!(cal.days_in_month(2025, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn add_days_crosses_year_boundary() {
        let cal = Gregorian;
        let dec31 = cal.date(2025, 12, 31).unwrap();

        assert_eq!(cal.add_days(dec31, 1).unwrap(), cal.date(2026, 1, 1).unwrap());
        assert_eq!(cal.add_days(dec31, -31).unwrap(), cal.date(2025, 11, 30).unwrap());
        assert_eq!(cal.add_days(dec31, 0).unwrap(), dec31);
    }

    #[test]
    fn add_days_out_of_range() {
        let cal = Gregorian;
        let err = cal.add_days(NaiveDate::MAX, 1).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
