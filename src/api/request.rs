//! Request types for the wage statement API.
//!
//! This module defines the JSON bodies and query strings the endpoints accept.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::count_selected_days;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryInput, WorkPeriod};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// The calendar year of the work month.
    pub year: i32,
    /// The 1-based work month.
    pub month: u32,
    /// The employee's display name.
    pub employee_name: String,
    /// Days worked in the month. May be omitted when `selected_dates` is sent.
    #[serde(default)]
    pub work_days: Option<Decimal>,
    /// The individual dates worked, as picked on a calendar.
    #[serde(default)]
    pub selected_dates: Option<Vec<NaiveDate>>,
    /// Hours worked in the month.
    #[serde(default)]
    pub work_hours: Option<Decimal>,
    /// The hourly wage.
    pub hourly_wage: Decimal,
    /// A caller-supplied weekly-rest allowance.
    #[serde(default)]
    pub weekly_holiday_allowance: Option<Decimal>,
    /// A bonus paid with this month's wages.
    #[serde(default)]
    pub bonus: Decimal,
    /// Free-text remarks.
    #[serde(default)]
    pub remarks: String,
}

impl SalaryRequest {
    /// The work days this request stands for.
    ///
    /// A date selection is counted with [`count_selected_days`]; when
    /// `work_days` is also sent, the two must agree.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if neither field is present, the
    /// selection is invalid, or the two disagree.
    pub fn resolve_work_days(&self) -> EngineResult<Decimal> {
        let Some(dates) = &self.selected_dates else {
            return self.work_days.ok_or_else(|| {
                EngineError::invalid_input("work_days", "work_days or selected_dates is required")
            });
        };

        let period = WorkPeriod::new(self.year, self.month)?;
        let selected = Decimal::from(count_selected_days(&period, dates)?);
        match self.work_days {
            Some(days) if days != selected => Err(EngineError::invalid_input(
                "work_days",
                format!(
                    "{} does not match the {} selected dates",
                    days.normalize(),
                    selected
                ),
            )),
            _ => Ok(selected),
        }
    }
}

impl TryFrom<SalaryRequest> for SalaryInput {
    type Error = EngineError;

    fn try_from(req: SalaryRequest) -> EngineResult<Self> {
        let work_days = req.resolve_work_days()?;
        Ok(SalaryInput {
            year: req.year,
            month: req.month,
            employee_name: req.employee_name,
            work_days,
            work_hours: req.work_hours,
            hourly_wage: req.hourly_wage,
            weekly_holiday_allowance: req.weekly_holiday_allowance,
            bonus: req.bonus,
            remarks: req.remarks,
        })
    }
}

/// Query string for `GET /business-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDaysQuery {
    /// The calendar year.
    pub year: i32,
    /// The 1-based month.
    pub month: u32,
}

/// Query string for `POST /statement/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuery {
    /// `json`, `png` or `pdf`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_uses_defaults() {
        let json = r#"{
            "year": 2025,
            "month": 1,
            "employee_name": "홍길동",
            "work_days": 20,
            "work_hours": 80,
            "hourly_wage": 11000
        }"#;

        let request: SalaryRequest = serde_json::from_str(json).unwrap();
        let input = SalaryInput::try_from(request).unwrap();

        assert_eq!(input.work_days, Decimal::from(20));
        assert_eq!(input.work_hours, Some(Decimal::from(80)));
        assert_eq!(input.bonus, Decimal::ZERO);
        assert_eq!(input.weekly_holiday_allowance, None);
        assert!(input.remarks.is_empty());
    }

    fn create_request(work_days: Option<u32>, dates: Option<&[u32]>) -> SalaryRequest {
        SalaryRequest {
            year: 2025,
            month: 1,
            employee_name: "홍길동".to_string(),
            work_days: work_days.map(Decimal::from),
            selected_dates: dates.map(|days| {
                days.iter()
                    .map(|d| NaiveDate::from_ymd_opt(2025, 1, *d).unwrap())
                    .collect()
            }),
            work_hours: Some(Decimal::from(8)),
            hourly_wage: Decimal::from(11000),
            weekly_holiday_allowance: None,
            bonus: Decimal::ZERO,
            remarks: String::new(),
        }
    }

    #[test]
    fn test_selected_dates_set_work_days() {
        let input = SalaryInput::try_from(create_request(None, Some(&[6, 7, 7]))).unwrap();
        assert_eq!(input.work_days, Decimal::from(2));
    }

    #[test]
    fn test_selected_dates_matching_work_days_are_accepted() {
        let request = create_request(Some(2), Some(&[6, 7]));
        assert_eq!(request.resolve_work_days().unwrap(), Decimal::from(2));
    }

    #[test]
    fn test_selected_dates_disagreeing_with_work_days_are_rejected() {
        match create_request(Some(3), Some(&[6, 7])).resolve_work_days() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "work_days");
                assert!(message.contains("2 selected dates"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_weekend_selection_is_rejected() {
        // 2025-01-05 is a Sunday
        match SalaryInput::try_from(create_request(None, Some(&[5]))) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "selected_dates"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_neither_days_nor_dates_is_rejected() {
        match create_request(None, None).resolve_work_days() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "work_days"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let json = r#"{ "year": 2025, "month": 1, "work_days": 20, "hourly_wage": 11000 }"#;
        let err = serde_json::from_str::<SalaryRequest>(json).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_export_query_defaults_to_json() {
        let query: ExportQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.format, "json");
    }
}
