//! Work period and holiday models.
//!
//! This module contains the [`WorkPeriod`] and [`Holiday`] types that define the
//! calendar month a wage statement covers.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A named non-working date.
///
/// # Example
///
/// ```
/// use wage_statement::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
///     name: "광복절".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "광복절").
    pub name: String,
}

/// One calendar month of work.
///
/// A work period always spans the whole month, from the 1st to the last
/// calendar day, regardless of which days were actually worked.
///
/// # Example
///
/// ```
/// use wage_statement::models::WorkPeriod;
/// use chrono::NaiveDate;
///
/// let period = WorkPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.format_range(), "2024.02.01 ~ 2024.02.29");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorkPeriod {
    year: i32,
    month: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl WorkPeriod {
    /// Creates the work period for a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when the month is outside 1–12 or
    /// the year cannot be represented as a calendar date.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("must be between 1 and 12, got {}", month),
            ));
        }

        let out_of_range = || {
            EngineError::invalid_input("year", format!("{} is outside the supported range", year))
        };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let end_date = start_date
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;

        Ok(Self {
            year,
            month,
            start_date,
            end_date,
        })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-based month.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first calendar day of the month.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last calendar day of the month.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The number of calendar days in the month (28–31).
    pub fn days_in_month(&self) -> u32 {
        self.end_date.day()
    }

    /// Iterates every calendar date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date
            .iter_days()
            .take(self.days_in_month() as usize)
    }

    /// Checks if a given date falls within this month (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Formats the month as `"YYYY.MM.DD ~ YYYY.MM.DD"`.
    pub fn format_range(&self) -> String {
        format!(
            "{} ~ {}",
            self.start_date.format("%Y.%m.%d"),
            self.end_date.format("%Y.%m.%d")
        )
    }

    /// Returns the month that follows this one, rolling December into January.
    ///
    /// ```
    /// use wage_statement::models::WorkPeriod;
    ///
    /// let next = WorkPeriod::new(2025, 12).unwrap().following().unwrap();
    /// assert_eq!((next.year(), next.month()), (2026, 1));
    /// ```
    pub fn following(&self) -> EngineResult<Self> {
        let next = self
            .start_date
            .checked_add_months(Months::new(1))
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "year",
                    format!("{} has no following month in range", self.year),
                )
            })?;
        Self::new(next.year(), next.month())
    }
}

impl std::fmt::Display for WorkPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
