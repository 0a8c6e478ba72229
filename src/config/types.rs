//! Configuration types for wage statement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! `Default` matching the shipped `rules.yaml`, so a partial file only
//! needs to name the values it changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Holiday;

/// How the engine obtains the month's work hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkHoursPolicy {
    /// Work hours are an authoritative input and must be supplied.
    #[default]
    Explicit,
    /// Work hours are `work_days * default_daily_hours`; a supplied value must agree.
    DerivedFromDays,
}

/// How the engine obtains the weekly-rest allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowancePolicy {
    /// Computed unless the caller supplies an amount.
    #[default]
    Overridable,
    /// Always computed; a supplied amount is rejected.
    Computed,
}

/// What the rural special tax is levied on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuralTaxBasis {
    /// `rural_tax_rate` applied to gross salary.
    #[default]
    GrossSalary,
    /// `rural_tax_share_of_income_tax` applied to the truncated income tax.
    IncomeTax,
}

/// What the calendar resolver does for a year with no holiday table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownYearPolicy {
    /// Fail with `UnsupportedYear`.
    #[default]
    Reject,
    /// Count weekends only and flag the result as an approximation.
    WeekendsOnly,
}

/// Work-hours rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkHoursRules {
    /// The hours in one standard working day (4 for the part-time schedule).
    pub default_daily_hours: Decimal,
    /// How work hours are obtained.
    pub policy: WorkHoursPolicy,
}

impl Default for WorkHoursRules {
    fn default() -> Self {
        Self {
            default_daily_hours: Decimal::from(4),
            policy: WorkHoursPolicy::default(),
        }
    }
}

/// Weekly-rest allowance (주휴수당) rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyRestRules {
    /// Paid hours granted per qualifying week.
    pub hours_per_week: Decimal,
    /// Work days treated as one standard month for proration.
    pub standard_month_days: Decimal,
    /// How the allowance is obtained.
    pub policy: AllowancePolicy,
}

impl Default for WeeklyRestRules {
    fn default() -> Self {
        Self {
            hours_per_week: Decimal::from(8),
            standard_month_days: Decimal::from(20),
            policy: AllowancePolicy::default(),
        }
    }
}

/// Withholding tax rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithholdingRules {
    /// Income tax rate applied to gross salary (0.03).
    pub income_tax_rate: Decimal,
    /// Rural tax rate applied to gross salary (0.003).
    pub rural_tax_rate: Decimal,
    /// What the rural tax is levied on.
    pub rural_tax_basis: RuralTaxBasis,
    /// Rural tax share of income tax when the basis is `income_tax` (0.10).
    pub rural_tax_share_of_income_tax: Decimal,
    /// Amounts are truncated to a multiple of this many won.
    pub rounding_unit: Decimal,
}

impl Default for WithholdingRules {
    fn default() -> Self {
        Self {
            income_tax_rate: Decimal::new(3, 2),
            rural_tax_rate: Decimal::new(3, 3),
            rural_tax_basis: RuralTaxBasis::default(),
            rural_tax_share_of_income_tax: Decimal::new(10, 2),
            rounding_unit: Decimal::from(10),
        }
    }
}

impl WithholdingRules {
    /// The nominal combined withholding rate before truncation (0.033).
    pub fn combined_rate(&self) -> Decimal {
        match self.rural_tax_basis {
            RuralTaxBasis::GrossSalary => self.income_tax_rate + self.rural_tax_rate,
            RuralTaxBasis::IncomeTax => {
                self.income_tax_rate * (Decimal::ONE + self.rural_tax_share_of_income_tax)
            }
        }
    }
}

/// Calendar resolver rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarRules {
    /// What to do for a year with no holiday table.
    pub unknown_year: UnknownYearPolicy,
}

/// The engine rules loaded from `rules.yaml`.
///
/// # Example
///
/// ```
/// use wage_statement::config::EngineRules;
/// use rust_decimal::Decimal;
///
/// let rules: EngineRules = serde_yaml::from_str("withholding:\n  rounding_unit: 100\n").unwrap();
/// assert_eq!(rules.withholding.rounding_unit, Decimal::from(100));
/// assert_eq!(rules.weekly_rest.standard_month_days, Decimal::from(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRules {
    /// Work-hours rules.
    pub work_hours: WorkHoursRules,
    /// Weekly-rest allowance rules.
    pub weekly_rest: WeeklyRestRules,
    /// Withholding rules.
    pub withholding: WithholdingRules,
    /// Calendar resolver rules.
    pub calendar: CalendarRules,
}

/// One year's holiday table, as stored in `holidays/<year>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayYearConfig {
    /// The year the table covers.
    pub year: i32,
    /// The holidays in that year.
    pub holidays: Vec<Holiday>,
}
