//! Business-day counting.
//!
//! A business day is Monday through Friday and not a listed holiday. The
//! count seeds the default work days of a statement; the engine itself
//! takes work days as an input.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{EngineRules, UnknownYearPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, Holiday, WarningSeverity, WorkPeriod};

use super::HolidayCalendar;

/// Legal reference for the public holiday list.
pub const PUBLIC_HOLIDAYS_REF: &str = "관공서의 공휴일에 관한 규정 제2조";

/// The kind of a calendar date for work-day purposes.
///
/// # Example
///
/// ```
/// use wage_statement::calendar::{DayKind, classify_date};
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// let holidays: BTreeSet<NaiveDate> = [NaiveDate::from_ymd_opt(2025, 10, 9).unwrap()].into();
///
/// // 2025-10-09 is a Thursday
/// assert_eq!(classify_date(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap(), &holidays), DayKind::Holiday);
/// // 2025-10-11 is a Saturday
/// assert_eq!(classify_date(NaiveDate::from_ymd_opt(2025, 10, 11).unwrap(), &holidays), DayKind::Weekend);
/// assert_eq!(classify_date(NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(), &holidays), DayKind::Workday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday through Friday and not a holiday.
    Workday,
    /// Saturday or Sunday.
    Weekend,
    /// A listed holiday falling on a weekday.
    Holiday,
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Workday => write!(f, "Workday"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Classifies a date. A holiday on a weekend is reported as a weekend.
pub fn classify_date(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> DayKind {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::Weekend,
        _ if holidays.contains(&date) => DayKind::Holiday,
        _ => DayKind::Workday,
    }
}

/// The business days of a month, in order.
pub fn business_dates(period: &WorkPeriod, holidays: &BTreeSet<NaiveDate>) -> Vec<NaiveDate> {
    period
        .dates()
        .filter(|date| classify_date(*date, holidays) == DayKind::Workday)
        .collect()
}

/// Counts the business days in a month.
///
/// Every date from the 1st to the last day of the month is visited; a date
/// counts if it is Monday–Friday and absent from `holidays`. The result never
/// exceeds the number of days in the month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the month is outside 1–12.
///
/// # Example
///
/// ```
/// use wage_statement::calendar::count_business_days;
/// use std::collections::BTreeSet;
///
/// // January 2026 has 22 weekdays
/// assert_eq!(count_business_days(2026, 1, &BTreeSet::new()).unwrap(), 22);
/// ```
pub fn count_business_days(
    year: i32,
    month: u32,
    holidays: &BTreeSet<NaiveDate>,
) -> EngineResult<u32> {
    let period = WorkPeriod::new(year, month)?;
    Ok(business_dates(&period, holidays).len() as u32)
}

/// Counts a caller's own selection of worked days.
///
/// Each date must fall inside the period and on a weekday; a date listed
/// twice counts once. Holidays may be selected, since a worker can be
/// scheduled on one.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] on `selected_dates` for a date
/// outside the month or on a weekend.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wage_statement::calendar::count_selected_days;
/// use wage_statement::models::WorkPeriod;
///
/// let period = WorkPeriod::new(2025, 1).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// assert_eq!(count_selected_days(&period, &[monday, monday]).unwrap(), 1);
/// ```
pub fn count_selected_days(period: &WorkPeriod, dates: &[NaiveDate]) -> EngineResult<u32> {
    let mut selected = BTreeSet::new();
    for date in dates {
        if !period.contains_date(*date) {
            return Err(EngineError::invalid_input(
                "selected_dates",
                format!("{} is outside {}", date, period),
            ));
        }
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(EngineError::invalid_input(
                "selected_dates",
                format!("{} is a {}", date, date.weekday()),
            ));
        }
        selected.insert(*date);
    }
    Ok(selected.len() as u32)
}

/// The business days of a month resolved against the holiday calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessDayResolution {
    /// The calendar year.
    pub year: i32,
    /// The 1-based month.
    pub month: u32,
    /// The number of business days.
    pub business_days: u32,
    /// The business dates themselves, the default selection of worked days.
    pub dates: Vec<NaiveDate>,
    /// Holidays that fall inside the month.
    pub holidays: Vec<Holiday>,
    /// True when the year had no holiday table and only weekends were excluded.
    pub weekends_only: bool,
    /// `business_days * default_daily_hours`, a default for work hours.
    pub suggested_work_hours: Decimal,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
    /// Warnings raised while resolving.
    pub warnings: Vec<AuditWarning>,
}

/// Resolves the business days of a month against the holiday calendar.
///
/// When the calendar has no table for the year, the configured
/// [`UnknownYearPolicy`] decides: `reject` fails with
/// [`EngineError::UnsupportedYear`], `weekends_only` counts weekdays and marks
/// the result with `weekends_only = true` and a warning.
///
/// # Arguments
///
/// * `period` - The month to resolve
/// * `calendar` - The holiday calendar
/// * `rules` - Engine rules (unknown-year policy and daily hours)
/// * `step_number` - The step number for audit trail sequencing
pub fn resolve_business_days(
    period: &WorkPeriod,
    calendar: &HolidayCalendar,
    rules: &EngineRules,
    step_number: u32,
) -> EngineResult<BusinessDayResolution> {
    let mut warnings = Vec::new();

    let (holiday_dates, holidays, weekends_only) = match calendar.holidays_in(period) {
        Ok(holidays) => {
            let dates: BTreeSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();
            (dates, holidays, false)
        }
        Err(EngineError::UnsupportedYear { year }) => match rules.calendar.unknown_year {
            UnknownYearPolicy::Reject => {
                warn!(year, "No holiday table for year, rejecting");
                return Err(EngineError::UnsupportedYear { year });
            }
            UnknownYearPolicy::WeekendsOnly => {
                warn!(year, "No holiday table for year, counting weekends only");
                warnings.push(AuditWarning::new(
                    "WEEKENDS_ONLY_CALENDAR",
                    format!(
                        "No holiday table for {}; only weekends were excluded",
                        year
                    ),
                    WarningSeverity::Medium,
                ));
                (BTreeSet::new(), Vec::new(), true)
            }
        },
        Err(other) => return Err(other),
    };

    let dates = business_dates(period, &holiday_dates);
    let business_days = dates.len() as u32;
    let suggested_work_hours = Decimal::from(business_days) * rules.work_hours.default_daily_hours;

    debug!(
        period = %period,
        business_days,
        holidays = holidays.len(),
        weekends_only,
        "Resolved business days"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "business_days".to_string(),
        rule_name: "Business Day Count".to_string(),
        legal_ref: PUBLIC_HOLIDAYS_REF.to_string(),
        input: serde_json::json!({
            "year": period.year(),
            "month": period.month(),
            "days_in_month": period.days_in_month(),
            "holidays": holidays.iter().map(|h| h.date.to_string()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "business_days": business_days,
            "weekends_only": weekends_only
        }),
        reasoning: format!(
            "{} of {} days in {} are weekdays that are not holidays",
            business_days,
            period.days_in_month(),
            period
        ),
    };

    Ok(BusinessDayResolution {
        year: period.year(),
        month: period.month(),
        business_days,
        dates,
        holidays,
        weekends_only,
        suggested_work_hours,
        audit_step,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn holiday(m: u32, d: u32, name: &str) -> Holiday {
        Holiday {
            date: date(2025, m, d),
            name: name.to_string(),
        }
    }

    fn calendar_2025() -> HolidayCalendar {
        let mut calendar = HolidayCalendar::new();
        calendar
            .insert_year(
                2025,
                vec![
                    holiday(1, 1, "신정"),
                    holiday(2, 9, "설날"),
                    holiday(2, 10, "설날"),
                    holiday(2, 11, "설날"),
                    holiday(3, 1, "삼일절"),
                ],
            )
            .unwrap();
        calendar
    }

    #[test]
    fn test_january_2025_excludes_new_year() {
        let holidays = calendar_2025().holiday_dates(2025).unwrap();
        // 23 weekdays minus 신정 (Wednesday)
        assert_eq!(count_business_days(2025, 1, &holidays).unwrap(), 22);
    }

    #[test]
    fn test_weekend_holiday_does_not_reduce_count() {
        let holidays = calendar_2025().holiday_dates(2025).unwrap();
        // 2025-03-01 is a Saturday; March has 21 weekdays
        assert_eq!(count_business_days(2025, 3, &holidays).unwrap(), 21);
        // 2025-02-09 is a Sunday, 10th and 11th are weekdays
        assert_eq!(count_business_days(2025, 2, &holidays).unwrap(), 18);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(matches!(
            count_business_days(2025, 0, &BTreeSet::new()),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_business_dates_never_include_weekends() {
        let period = WorkPeriod::new(2025, 8).unwrap();
        for d in business_dates(&period, &BTreeSet::new()) {
            assert!(!matches!(d.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn test_classify_weekend_holiday_as_weekend() {
        let holidays: BTreeSet<NaiveDate> = [date(2025, 3, 1)].into();
        assert_eq!(classify_date(date(2025, 3, 1), &holidays), DayKind::Weekend);
    }

    #[test]
    fn test_resolve_known_year() {
        let calendar = calendar_2025();
        let rules = EngineRules::default();
        let period = WorkPeriod::new(2025, 2).unwrap();

        let resolution = resolve_business_days(&period, &calendar, &rules, 1).unwrap();

        assert_eq!(resolution.business_days, 18);
        assert_eq!(resolution.dates.len(), 18);
        assert!(!resolution.dates.contains(&date(2025, 2, 10)));
        assert_eq!(resolution.holidays.len(), 3);
        assert!(!resolution.weekends_only);
        assert!(resolution.warnings.is_empty());
        assert_eq!(resolution.suggested_work_hours, Decimal::from(72));
        assert_eq!(resolution.audit_step.rule_id, "business_days");
        assert_eq!(resolution.audit_step.output["business_days"], 18);
    }

    #[test]
    fn test_resolve_unknown_year_rejects_by_default() {
        let calendar = calendar_2025();
        let rules = EngineRules::default();
        let period = WorkPeriod::new(2026, 1).unwrap();

        match resolve_business_days(&period, &calendar, &rules, 1) {
            Err(EngineError::UnsupportedYear { year }) => assert_eq!(year, 2026),
            other => panic!("Expected UnsupportedYear, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_year_weekends_only() {
        let calendar = calendar_2025();
        let mut rules = EngineRules::default();
        rules.calendar.unknown_year = UnknownYearPolicy::WeekendsOnly;
        let period = WorkPeriod::new(2026, 1).unwrap();

        let resolution = resolve_business_days(&period, &calendar, &rules, 1).unwrap();

        assert_eq!(resolution.business_days, 22);
        assert!(resolution.weekends_only);
        assert!(resolution.holidays.is_empty());
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].code, "WEEKENDS_ONLY_CALENDAR");
    }

    #[test]
    fn test_selected_days_counts_each_date_once() {
        let period = WorkPeriod::new(2025, 1).unwrap();
        let dates = [date(2025, 1, 6), date(2025, 1, 7), date(2025, 1, 6)];
        assert_eq!(count_selected_days(&period, &dates).unwrap(), 2);
    }

    #[test]
    fn test_selected_days_allows_holidays() {
        let period = WorkPeriod::new(2025, 1).unwrap();
        // 신정 falls on a Wednesday
        assert_eq!(count_selected_days(&period, &[date(2025, 1, 1)]).unwrap(), 1);
    }

    #[test]
    fn test_selected_days_empty_is_zero() {
        let period = WorkPeriod::new(2025, 1).unwrap();
        assert_eq!(count_selected_days(&period, &[]).unwrap(), 0);
    }

    #[test]
    fn test_selected_days_rejects_other_month() {
        let period = WorkPeriod::new(2025, 1).unwrap();
        match count_selected_days(&period, &[date(2025, 2, 3)]) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "selected_dates");
                assert!(message.contains("2025-02-03"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_days_rejects_weekend() {
        let period = WorkPeriod::new(2025, 1).unwrap();
        // 2025-01-04 is a Saturday
        match count_selected_days(&period, &[date(2025, 1, 6), date(2025, 1, 4)]) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "selected_dates"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
