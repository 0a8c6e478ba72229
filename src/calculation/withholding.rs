//! Withholding tax calculation (소득세 / 농어촌세).
//!
//! Both taxes are flat rates on gross pay, truncated down to the nearest
//! multiple of the rounding unit (10 won). Truncation, not rounding to
//! nearest, is the rule.

use rust_decimal::Decimal;

use crate::config::{RuralTaxBasis, WithholdingRules};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Reference for withholding on business income.
pub const WITHHOLDING_REF: &str = "소득세법 제129조 제1항 제3호";

/// The result of calculating withholding, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Income tax (소득세).
    pub income_tax: Decimal,
    /// Rural special tax (농어촌세).
    pub rural_tax: Decimal,
    /// `income_tax + rural_tax`.
    pub total_deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Truncates an amount down to a multiple of `unit`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `unit` is not positive.
///
/// # Example
///
/// ```
/// use wage_statement::calculation::truncate_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let unit = Decimal::from(10);
/// assert_eq!(truncate_to_unit(Decimal::from_str("2904").unwrap(), unit).unwrap(), Decimal::from(2900));
/// assert_eq!(truncate_to_unit(Decimal::from_str("29049.99").unwrap(), unit).unwrap(), Decimal::from(29040));
/// ```
pub fn truncate_to_unit(amount: Decimal, unit: Decimal) -> EngineResult<Decimal> {
    if unit <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "withholding.rounding_unit",
            format!("must be positive, got {}", unit.normalize()),
        ));
    }
    Ok((amount / unit).floor() * unit)
}

/// Calculates income tax and rural tax on gross pay.
///
/// ```text
/// income_tax = floor(total * income_tax_rate / unit) * unit
/// rural_tax  = floor(total * rural_tax_rate / unit) * unit                 (gross_salary)
///            = floor(income_tax * rural_tax_share_of_income_tax / unit) * unit  (income_tax)
/// ```
///
/// With the default rates and a 10 won unit both rural-tax bases give the
/// same amount for every gross pay.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if the rounding unit is not positive.
///
/// # Example
///
/// ```
/// use wage_statement::calculation::calculate_withholding;
/// use wage_statement::config::WithholdingRules;
/// use rust_decimal::Decimal;
///
/// let result = calculate_withholding(Decimal::from(968000), &WithholdingRules::default(), 1).unwrap();
/// assert_eq!(result.income_tax, Decimal::from(29040));
/// assert_eq!(result.rural_tax, Decimal::from(2900));
/// assert_eq!(result.total_deduction, Decimal::from(31940));
/// ```
pub fn calculate_withholding(
    total_salary: Decimal,
    rules: &WithholdingRules,
    step_number: u32,
) -> EngineResult<WithholdingResult> {
    let unit = rules.rounding_unit;
    let income_tax = truncate_to_unit(total_salary * rules.income_tax_rate, unit)?;

    let (rural_tax, rural_formula) = match rules.rural_tax_basis {
        RuralTaxBasis::GrossSalary => (
            truncate_to_unit(total_salary * rules.rural_tax_rate, unit)?,
            format!(
                "floor({} x {} / {}) x {}",
                total_salary.normalize(),
                rules.rural_tax_rate.normalize(),
                unit.normalize(),
                unit.normalize()
            ),
        ),
        RuralTaxBasis::IncomeTax => (
            truncate_to_unit(income_tax * rules.rural_tax_share_of_income_tax, unit)?,
            format!(
                "floor({} x {} / {}) x {}",
                income_tax.normalize(),
                rules.rural_tax_share_of_income_tax.normalize(),
                unit.normalize(),
                unit.normalize()
            ),
        ),
    };

    let total_deduction = income_tax + rural_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding".to_string(),
        rule_name: "Withholding Tax".to_string(),
        legal_ref: WITHHOLDING_REF.to_string(),
        input: serde_json::json!({
            "total_salary": total_salary.normalize().to_string(),
            "income_tax_rate": rules.income_tax_rate.normalize().to_string(),
            "rural_tax_rate": rules.rural_tax_rate.normalize().to_string(),
            "rural_tax_basis": rules.rural_tax_basis,
            "rounding_unit": unit.normalize().to_string()
        }),
        output: serde_json::json!({
            "income_tax": income_tax.normalize().to_string(),
            "rural_tax": rural_tax.normalize().to_string(),
            "total_deduction": total_deduction.normalize().to_string()
        }),
        reasoning: format!(
            "Income tax floor({} x {} / {}) x {} = {}원; rural tax {} = {}원",
            total_salary.normalize(),
            rules.income_tax_rate.normalize(),
            unit.normalize(),
            unit.normalize(),
            income_tax.normalize(),
            rural_formula,
            rural_tax.normalize()
        ),
    };

    Ok(WithholdingResult {
        income_tax,
        rural_tax,
        total_deduction,
        audit_step,
    })
}
