//! Per-year holiday tables.
//!
//! Lunar holidays (설날, 추석, 부처님 오신 날) and substitute holidays move
//! every year, so holidays are looked up from a table per year rather than
//! derived. A year without a table is reported as not covered.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, WorkPeriod};

/// An immutable mapping from year to that year's holidays.
///
/// # Example
///
/// ```
/// use wage_statement::calendar::HolidayCalendar;
/// use wage_statement::models::Holiday;
/// use chrono::NaiveDate;
///
/// let mut calendar = HolidayCalendar::new();
/// calendar
///     .insert_year(2025, vec![Holiday {
///         date: NaiveDate::from_ymd_opt(2025, 10, 9).unwrap(),
///         name: "한글날".to_string(),
///     }])
///     .unwrap();
///
/// assert!(calendar.covers(2025));
/// assert!(!calendar.covers(2026));
/// assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, BTreeMap<NaiveDate, String>>,
}

impl HolidayCalendar {
    /// Creates a calendar that covers no years.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the holiday table for one year, replacing any previous table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if a holiday falls outside `year`.
    pub fn insert_year(
        &mut self,
        year: i32,
        holidays: impl IntoIterator<Item = Holiday>,
    ) -> EngineResult<()> {
        let mut table = BTreeMap::new();
        for holiday in holidays {
            if holiday.date.year() != year {
                return Err(EngineError::invalid_input(
                    "holidays",
                    format!(
                        "{} ({}) is not in year {}",
                        holiday.date, holiday.name, year
                    ),
                ));
            }
            table.insert(holiday.date, holiday.name);
        }
        self.years.insert(year, table);
        Ok(())
    }

    /// Returns true if the calendar has a table for `year`.
    pub fn covers(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// The covered years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Returns true if `date` is a listed holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.years
            .get(&date.year())
            .is_some_and(|table| table.contains_key(&date))
    }

    /// The holiday dates of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedYear`] if the year is not covered.
    pub fn holiday_dates(&self, year: i32) -> EngineResult<BTreeSet<NaiveDate>> {
        self.years
            .get(&year)
            .map(|table| table.keys().copied().collect())
            .ok_or(EngineError::UnsupportedYear { year })
    }

    /// The holidays that fall inside `period`, in date order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedYear`] if the period's year is not covered.
    pub fn holidays_in(&self, period: &WorkPeriod) -> EngineResult<Vec<Holiday>> {
        let table = self
            .years
            .get(&period.year())
            .ok_or(EngineError::UnsupportedYear {
                year: period.year(),
            })?;

        Ok(table
            .range(period.start_date()..=period.end_date())
            .map(|(date, name)| Holiday {
                date: *date,
                name: name.clone(),
            })
            .collect())
    }
}
