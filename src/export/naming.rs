//! Statement titles and file names.
//!
//! Wages for a month are paid in the following month, so titles and file
//! names carry the pay-out month rather than the work month.

use crate::error::EngineResult;
use crate::models::{SalaryCalculation, WorkPeriod};

use super::ExportFormat;

/// The month wages for `period` are paid in.
///
/// # Example
///
/// ```
/// use wage_statement::export::payout_month;
/// use wage_statement::models::WorkPeriod;
///
/// let payout = payout_month(&WorkPeriod::new(2025, 12).unwrap()).unwrap();
/// assert_eq!((payout.year(), payout.month()), (2026, 1));
/// ```
pub fn payout_month(period: &WorkPeriod) -> EngineResult<WorkPeriod> {
    period.following()
}

/// The statement title, e.g. `2025년 02월 급여명세서` for January 2025 work.
pub fn statement_title(period: &WorkPeriod) -> EngineResult<String> {
    let payout = payout_month(period)?;
    Ok(format!(
        "{}년 {:02}월 급여명세서",
        payout.year(),
        payout.month()
    ))
}

/// The export file name, e.g. `홍길동_2025년02월_급여명세서.png`.
///
/// Path separators in the employee name are replaced with `_`.
pub fn statement_file_name(calc: &SalaryCalculation, format: ExportFormat) -> EngineResult<String> {
    let payout = payout_month(&calc.period()?)?;
    let name: String = calc
        .employee_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    Ok(format!(
        "{}_{}년{:02}월_급여명세서.{}",
        name,
        payout.year(),
        payout.month(),
        format.extension()
    ))
}
