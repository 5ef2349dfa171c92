//! Inclusive calendar date ranges used to scope queries and coverage checks.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::SpendwatchError;

/// Inclusive range of calendar days, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, SpendwatchError> {
        if from > to {
            return Err(SpendwatchError::InvalidInput(format!(
                "date range start {} is after end {}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// Every day of the given calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, SpendwatchError> {
        let last_day = days_in_month(year, month)?;
        Self::first_days(year, month, last_day)
    }

    /// Days `1..=days` of the given month. `days` is clamped to the month length.
    pub fn first_days(year: i32, month: u32, days: u32) -> Result<Self, SpendwatchError> {
        let last_day = days.clamp(1, days_in_month(year, month)?);
        let from = month_start(year, month)?;
        Self::new(from, from + Duration::days(i64::from(last_day) - 1))
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of calendar days in the range.
    pub fn len_days(&self) -> usize {
        ((self.to - self.from).num_days() + 1) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Every calendar day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

fn month_start(year: i32, month: u32) -> Result<NaiveDate, SpendwatchError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        SpendwatchError::InvalidInput(format!("invalid month {}-{:02}", year, month))
    })
}

/// Length of a calendar month in days.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, SpendwatchError> {
    let first = month_start(year, month)?;
    let next = if month == 12 {
        month_start(year + 1, 1)?
    } else {
        month_start(year, month + 1)?
    };
    Ok((next - first).num_days() as u32)
}
