//! Salary input and salary calculation models.
//!
//! This module contains [`SalaryInput`], the tuple the engine consumes, and
//! [`SalaryCalculation`], the immutable statement record it produces.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::WorkPeriod;

/// The inputs for one month's wage statement.
///
/// Monetary amounts are in won. `work_hours` and `weekly_holiday_allowance`
/// are optional at the boundary; how a missing or supplied value is treated
/// is decided by the configured [`WorkHoursPolicy`] and [`AllowancePolicy`].
///
/// [`WorkHoursPolicy`]: crate::config::WorkHoursPolicy
/// [`AllowancePolicy`]: crate::config::AllowancePolicy
///
/// # Example
///
/// ```
/// use wage_statement::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput {
///     year: 2025,
///     month: 1,
///     employee_name: "홍길동".to_string(),
///     work_days: Decimal::from(20),
///     work_hours: Some(Decimal::from(80)),
///     hourly_wage: Decimal::from(11000),
///     weekly_holiday_allowance: None,
///     bonus: Decimal::ZERO,
///     remarks: String::new(),
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// The calendar year of the work month.
    pub year: i32,
    /// The 1-based work month.
    pub month: u32,
    /// The employee's display name.
    pub employee_name: String,
    /// Days worked in the month (may be fractional).
    pub work_days: Decimal,
    /// Total hours worked in the month.
    #[serde(default)]
    pub work_hours: Option<Decimal>,
    /// The hourly wage.
    pub hourly_wage: Decimal,
    /// A caller-supplied weekly-rest allowance, if any.
    #[serde(default)]
    pub weekly_holiday_allowance: Option<Decimal>,
    /// A bonus paid with this month's wages.
    #[serde(default)]
    pub bonus: Decimal,
    /// Free-text remarks printed on the statement.
    #[serde(default)]
    pub remarks: String,
}

impl SalaryInput {
    /// Validates the input and returns the work period it covers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when:
    /// - the month is outside 1–12 or the year is out of range
    /// - the employee name is blank
    /// - any numeric field is negative
    /// - `work_days` exceeds the number of days in the month
    pub fn validate(&self) -> EngineResult<WorkPeriod> {
        let period = WorkPeriod::new(self.year, self.month)?;

        if self.employee_name.trim().is_empty() {
            return Err(EngineError::invalid_input("employee_name", "must not be blank"));
        }

        ensure_non_negative("work_days", self.work_days)?;
        if let Some(hours) = self.work_hours {
            ensure_non_negative("work_hours", hours)?;
        }
        ensure_non_negative("hourly_wage", self.hourly_wage)?;
        if let Some(allowance) = self.weekly_holiday_allowance {
            ensure_non_negative("weekly_holiday_allowance", allowance)?;
        }
        ensure_non_negative("bonus", self.bonus)?;

        let days_in_month = Decimal::from(period.days_in_month());
        if self.work_days > days_in_month {
            return Err(EngineError::invalid_input(
                "work_days",
                format!(
                    "{} exceeds the {} days in {}",
                    self.work_days.normalize(),
                    days_in_month,
                    period
                ),
            ));
        }

        Ok(period)
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value.normalize()),
        ));
    }
    Ok(())
}

/// Where the weekly-rest allowance on a statement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceSource {
    /// Computed by the engine from the hourly wage and work days.
    Computed,
    /// Supplied by the caller and used as-is.
    CallerProvided,
}

/// The complete wage breakdown for one month.
///
/// This is a plain value: it has no identity or timestamp, so calculating the
/// same input twice yields equal records.
///
/// Invariants:
/// - `total_salary == base_salary + weekly_holiday_allowance + bonus`
/// - `total_deduction == income_tax + rural_tax`
/// - `net_payment == total_salary - total_deduction`
/// - `income_tax` and `rural_tax` are non-negative multiples of the rounding unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// The employee's display name.
    pub employee_name: String,
    /// The calendar year of the work month.
    pub year: i32,
    /// The 1-based work month.
    pub month: u32,
    /// The full work month, formatted `"YYYY.MM.DD ~ YYYY.MM.DD"`.
    pub work_period: String,
    /// Days worked.
    pub work_days: Decimal,
    /// Hours worked.
    pub work_hours: Decimal,
    /// The hourly wage.
    pub hourly_wage: Decimal,
    /// `work_hours * hourly_wage`.
    pub base_salary: Decimal,
    /// The weekly-rest allowance (주휴수당).
    pub weekly_holiday_allowance: Decimal,
    /// Whether the allowance was computed or supplied.
    pub allowance_source: AllowanceSource,
    /// The bonus.
    pub bonus: Decimal,
    /// Gross pay before deductions.
    pub total_salary: Decimal,
    /// Income tax withheld (소득세).
    pub income_tax: Decimal,
    /// Rural special tax withheld (농어촌세).
    pub rural_tax: Decimal,
    /// `income_tax + rural_tax`.
    pub total_deduction: Decimal,
    /// Pay after deductions.
    pub net_payment: Decimal,
    /// Free-text remarks.
    pub remarks: String,
}

impl SalaryCalculation {
    /// Returns the work period this statement covers.
    pub fn period(&self) -> EngineResult<WorkPeriod> {
        WorkPeriod::new(self.year, self.month)
    }
}
