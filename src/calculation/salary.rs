//! The salary calculation engine.
//!
//! Chains the individual rules into one statement: work hours, base salary,
//! weekly-rest allowance, gross pay, withholding and net pay. Input is
//! validated up front; any failure aborts with no partial result.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::EngineRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, SalaryCalculation, SalaryInput};

use super::{
    calculate_base_salary, calculate_weekly_allowance, calculate_withholding, resolve_work_hours,
};

/// A salary calculation together with the rule steps that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracedCalculation {
    /// The statement record.
    pub calculation: SalaryCalculation,
    /// One step per rule applied, in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates a month's wage statement.
///
/// Deterministic and free of I/O: the same input and rules always give an
/// equal [`SalaryCalculation`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the input fails validation or
/// conflicts with a configured policy.
///
/// # Example
///
/// ```
/// use wage_statement::calculation::calculate_salary;
/// use wage_statement::config::EngineRules;
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
///
/// let calc = calculate_salary(&input, &EngineRules::default()).unwrap();
/// assert_eq!(calc.total_salary, Decimal::from(968000));
/// assert_eq!(calc.net_payment, Decimal::from(936060));
/// assert_eq!(calc.work_period, "2025.01.01 ~ 2025.01.31");
/// ```
pub fn calculate_salary(
    input: &SalaryInput,
    rules: &EngineRules,
) -> EngineResult<SalaryCalculation> {
    calculate_salary_with_trace(input, rules).map(|traced| traced.calculation)
}

/// Calculates a month's wage statement and records every rule applied.
///
/// # Errors
///
/// See [`calculate_salary`].
pub fn calculate_salary_with_trace(
    input: &SalaryInput,
    rules: &EngineRules,
) -> EngineResult<TracedCalculation> {
    let period = input.validate()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let hours = resolve_work_hours(input, &rules.work_hours, step_number)?;
    steps.push(hours.audit_step);
    step_number += 1;

    let base = calculate_base_salary(hours.work_hours, input.hourly_wage, step_number)?;
    steps.push(base.audit_step);
    step_number += 1;

    let allowance = calculate_weekly_allowance(
        input.hourly_wage,
        input.work_days,
        input.weekly_holiday_allowance,
        &rules.weekly_rest,
        step_number,
    )?;
    steps.push(allowance.audit_step);
    warnings.extend(allowance.warnings);
    step_number += 1;

    let total_salary = base
        .amount
        .checked_add(allowance.amount)
        .and_then(|sum| sum.checked_add(input.bonus))
        .ok_or_else(|| {
            EngineError::invalid_input("bonus", "total salary is too large to represent")
        })?;
    steps.push(AuditStep {
        step_number,
        rule_id: "total_salary".to_string(),
        rule_name: "Total Salary".to_string(),
        legal_ref: String::new(),
        input: serde_json::json!({
            "base_salary": base.amount.normalize().to_string(),
            "weekly_holiday_allowance": allowance.amount.normalize().to_string(),
            "bonus": input.bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_salary": total_salary.normalize().to_string()
        }),
        reasoning: format!(
            "{}원 + {}원 + {}원 = {}원",
            base.amount.normalize(),
            allowance.amount.normalize(),
            input.bonus.normalize(),
            total_salary.normalize()
        ),
    });
    step_number += 1;

    let withholding = calculate_withholding(total_salary, &rules.withholding, step_number)?;
    steps.push(withholding.audit_step);
    step_number += 1;

    let net_payment = total_salary - withholding.total_deduction;
    steps.push(AuditStep {
        step_number,
        rule_id: "net_payment".to_string(),
        rule_name: "Net Payment".to_string(),
        legal_ref: String::new(),
        input: serde_json::json!({
            "total_salary": total_salary.normalize().to_string(),
            "total_deduction": withholding.total_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_payment": net_payment.normalize().to_string()
        }),
        reasoning: format!(
            "{}원 - {}원 = {}원",
            total_salary.normalize(),
            withholding.total_deduction.normalize(),
            net_payment.normalize()
        ),
    });

    debug!(
        period = %period,
        total_salary = %total_salary,
        net_payment = %net_payment,
        steps = steps.len(),
        "Salary calculated"
    );

    let calculation = SalaryCalculation {
        employee_name: input.employee_name.clone(),
        year: period.year(),
        month: period.month(),
        work_period: period.format_range(),
        work_days: input.work_days,
        work_hours: hours.work_hours,
        hourly_wage: input.hourly_wage,
        base_salary: base.amount,
        weekly_holiday_allowance: allowance.amount,
        allowance_source: allowance.source,
        bonus: input.bonus,
        total_salary,
        income_tax: withholding.income_tax,
        rural_tax: withholding.rural_tax,
        total_deduction: withholding.total_deduction,
        net_payment,
        remarks: input.remarks.clone(),
    };

    Ok(TracedCalculation {
        calculation,
        steps,
        warnings,
    })
}

/// Checks that a statement's money fields agree exactly.
///
/// True when gross pay is the sum of its parts, the deduction is the sum of
/// both taxes, net pay is gross minus deduction and neither tax is negative.
pub fn reconciles(calc: &SalaryCalculation) -> bool {
    let gross = calc
        .base_salary
        .checked_add(calc.weekly_holiday_allowance)
        .and_then(|sum| sum.checked_add(calc.bonus));
    let deduction = calc.income_tax.checked_add(calc.rural_tax);
    let net = calc.total_salary.checked_sub(calc.total_deduction);

    gross == Some(calc.total_salary)
        && deduction == Some(calc.total_deduction)
        && net == Some(calc.net_payment)
        && calc.income_tax >= Decimal::ZERO
        && calc.rural_tax >= Decimal::ZERO
}
