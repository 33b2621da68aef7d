//! Month grid computation.
//!
//! A [`Grid`] always starts with one full week taken from the tail of the
//! previous month, then covers the requested month, and is filled up with
//! days of the following month until it is exactly seven weeks long. Every
//! slot carries a date, so the flattened grid is a run of 49 consecutive days
//! from a Sunday to a Saturday.

use chrono::{Month, NaiveDate};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};
use num_traits::FromPrimitive;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::datetime::{DateArithmetic, DateComponents, Gregorian};
use crate::error::{Error, ErrorKind, Result};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                &format!("month {} is outside 1..=12", month),
            ));
        }

        Ok(YearMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        Month::from_u32(self.month)
            .map(|m| m.name())
            .unwrap_or_default()
    }

    pub fn contains(&self, components: &DateComponents) -> bool {
        components.year == self.year && components.month == self.month
    }

    /// The following month, `None` past the last representable year.
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Some(YearMonth {
                year: self.year.checked_add(1)?,
                month: 1,
            })
        } else {
            Some(YearMonth {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Some(YearMonth {
                year: self.year.checked_sub(1)?,
                month: 12,
            })
        } else {
            Some(YearMonth {
                year: self.year,
                month: self.month - 1,
            })
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn year_month(input: &str) -> IResult<&str, (i32, u32)> {
    separated_pair(
        map_res(digit1, |s: &str| s.parse::<i32>()),
        char('-'),
        map_res(digit1, |s: &str| s.parse::<u32>()),
    )(input)
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (year, month)) = all_consuming(year_month)(s.trim())
            .map_err(|err| Error::from(err).with_msg(&format!("'{}' is not YYYY-MM", s)))?;

        YearMonth::new(year, month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay<D = NaiveDate> {
    pub date: D,
    pub day_of_month: u32,
    pub in_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow<D = NaiveDate> {
    slots: [Option<CalendarDay<D>>; DAYS_PER_WEEK],
}

impl<D: Copy> WeekRow<D> {
    fn from_days(days: &[CalendarDay<D>]) -> Self {
        let mut slots = [None; DAYS_PER_WEEK];
        for (slot, day) in slots.iter_mut().zip(days) {
            *slot = Some(*day);
        }
        WeekRow { slots }
    }

    pub fn slots(&self) -> &[Option<CalendarDay<D>>; DAYS_PER_WEEK] {
        &self.slots
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay<D>> {
        self.slots.iter().flatten()
    }
}

impl<D> Index<usize> for WeekRow<D> {
    type Output = Option<CalendarDay<D>>;

    fn index(&self, column: usize) -> &Self::Output {
        &self.slots[column]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<D = NaiveDate> {
    year_month: YearMonth,
    rows: Vec<WeekRow<D>>,
}

impl<D: Copy> Grid<D> {
    pub fn year_month(&self) -> YearMonth {
        self.year_month
    }

    pub fn rows(&self) -> &[WeekRow<D>] {
        &self.rows
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay<D>> {
        self.rows.iter().flat_map(|row| row.days())
    }

    pub fn first_day(&self) -> Option<&CalendarDay<D>> {
        self.days().next()
    }

    pub fn last_day(&self) -> Option<&CalendarDay<D>> {
        self.days().last()
    }
}

impl<D> Index<usize> for Grid<D> {
    type Output = WeekRow<D>;

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

pub fn compute_grid(year: i32, month: u32) -> Result<Grid> {
    compute_grid_with(&Gregorian, year, month)
}

pub fn compute_grid_with<C: DateArithmetic>(
    cal: &C,
    year: i32,
    month: u32,
) -> Result<Grid<C::Date>> {
    let year_month = YearMonth::new(year, month)?;

    let first_of_month = cal.date(year, month, 1)?;
    let days_before = i64::from(cal.components_of(first_of_month).weekday) - 1;
    let first_sunday = cal.add_days(first_of_month, -days_before)?;

    // Always lead with a full week of the previous month.
    let begin = cal.add_days(first_sunday, -(DAYS_PER_WEEK as i64))?;
    let end = cal.add_days(begin, (DAYS_PER_WEEK * WEEKS_PER_GRID) as i64 - 1)?;

    let last_of_month = cal.date(year, month, cal.days_in_month(year, month)?)?;
    let days_after = DAYS_PER_WEEK as i64 - i64::from(cal.components_of(last_of_month).weekday);
    let last_saturday = cal.add_days(last_of_month, days_after)?;
    if last_saturday > end {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            &format!("{} does not fit into {} weeks", year_month, WEEKS_PER_GRID),
        ));
    }

    log::debug!("grid for {}: {:?}..={:?}", year_month, begin, end);

    let mut days = Vec::with_capacity(DAYS_PER_WEEK * WEEKS_PER_GRID);
    let mut current = begin;
    loop {
        let components = cal.components_of(current);
        days.push(CalendarDay {
            date: current,
            day_of_month: components.day,
            in_current_month: year_month.contains(&components),
        });

        if current >= end {
            break;
        }
        current = cal.add_days(current, 1)?;
    }

    let rows = days
        .chunks(DAYS_PER_WEEK)
        .map(WeekRow::from_days)
        .collect();

    Ok(Grid { year_month, rows })
}
