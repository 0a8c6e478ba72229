//! Base salary calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Reference for time-based wages.
pub const BASE_SALARY_REF: &str = "근로기준법 제2조 제1항 제5호";

/// The result of calculating the base salary, including the audit step.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// `work_hours * hourly_wage`.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the base salary as hours worked times the hourly wage.
///
/// Every hour is paid at the same rate; there are no overtime or night
/// premiums.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the product is too large to
/// represent.
///
/// # Example
///
/// ```
/// use wage_statement::calculation::calculate_base_salary;
/// use rust_decimal::Decimal;
///
/// let result = calculate_base_salary(Decimal::from(80), Decimal::from(11000), 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(880000));
/// ```
pub fn calculate_base_salary(
    work_hours: Decimal,
    hourly_wage: Decimal,
    step_number: u32,
) -> EngineResult<BaseSalaryResult> {
    let amount = work_hours.checked_mul(hourly_wage).ok_or_else(|| {
        EngineError::invalid_input("hourly_wage", "base salary is too large to represent")
    })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary".to_string(),
        legal_ref: BASE_SALARY_REF.to_string(),
        input: serde_json::json!({
            "work_hours": work_hours.normalize().to_string(),
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_salary": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours x {}원 = {}원",
            work_hours.normalize(),
            hourly_wage.normalize(),
            amount.normalize()
        ),
    };

    Ok(BaseSalaryResult { amount, audit_step })
}
