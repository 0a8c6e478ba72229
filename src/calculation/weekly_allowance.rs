//! Weekly-rest allowance (주휴수당) calculation.
//!
//! A worker who completes the agreed days of a week is paid for one rest day.
//! For the four-hour schedule that is eight paid hours a week, prorated over
//! a standard month of twenty work days:
//!
//! ```text
//! allowance = floor(hourly_wage * 8 * work_days / 20)
//! ```
//!
//! The floor applies to the whole expression and there is no cap above
//! twenty days.

use rust_decimal::Decimal;

use crate::config::{AllowancePolicy, WeeklyRestRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{AllowanceSource, AuditStep, AuditWarning, WarningSeverity};

/// Reference for the paid weekly rest day.
pub const WEEKLY_REST_REF: &str = "근로기준법 제55조 제1항";

/// The result of calculating the weekly-rest allowance.
#[derive(Debug, Clone)]
pub struct WeeklyAllowanceResult {
    /// The allowance in won.
    pub amount: Decimal,
    /// Whether the amount was computed or supplied.
    pub source: AllowanceSource,
    /// Warnings raised by this rule.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the weekly-rest allowance for a month.
///
/// Under [`AllowancePolicy::Overridable`] a supplied amount is used as-is;
/// otherwise the allowance is computed from the hourly wage and work days.
///
/// # Arguments
///
/// * `hourly_wage` - The hourly wage
/// * `work_days` - Days worked in the month
/// * `provided` - An allowance supplied by the caller, if any
/// * `rules` - Weekly-rest rules (hours per week, standard month, policy)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when:
/// - the policy is `computed` and an amount was supplied
/// - `standard_month_days` is zero
/// - the amount is too large to represent
///
/// # Example
///
/// ```
/// use wage_statement::calculation::calculate_weekly_allowance;
/// use wage_statement::config::WeeklyRestRules;
/// use rust_decimal::Decimal;
///
/// let result = calculate_weekly_allowance(
///     Decimal::from(11000),
///     Decimal::from(20),
///     None,
///     &WeeklyRestRules::default(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.amount, Decimal::from(88000));
/// ```
pub fn calculate_weekly_allowance(
    hourly_wage: Decimal,
    work_days: Decimal,
    provided: Option<Decimal>,
    rules: &WeeklyRestRules,
    step_number: u32,
) -> EngineResult<WeeklyAllowanceResult> {
    match (rules.policy, provided) {
        (AllowancePolicy::Overridable, Some(amount)) => {
            return Ok(caller_provided(amount, hourly_wage, work_days, step_number));
        }
        (AllowancePolicy::Computed, Some(_)) => {
            return Err(EngineError::invalid_input(
                "weekly_holiday_allowance",
                "is computed by the engine and must not be supplied",
            ));
        }
        (_, None) => {}
    }

    let too_large = || {
        EngineError::invalid_input(
            "hourly_wage",
            "weekly holiday allowance is too large to represent",
        )
    };

    // Multiply before dividing so the floor sees the exact product
    let weekly_pay = hourly_wage
        .checked_mul(rules.hours_per_week)
        .and_then(|pay| pay.checked_mul(work_days))
        .ok_or_else(too_large)?;
    let prorated = weekly_pay
        .checked_div(rules.standard_month_days)
        .ok_or_else(|| {
            EngineError::invalid_input("weekly_rest.standard_month_days", "must not be zero")
        })?;
    let amount = prorated.floor();

    let mut warnings = Vec::new();
    if work_days > rules.standard_month_days {
        warnings.push(AuditWarning::new(
            "ALLOWANCE_ABOVE_STANDARD_MONTH",
            format!(
                "{} work days exceed the {}-day standard month; the allowance is not capped",
                work_days.normalize(),
                rules.standard_month_days.normalize()
            ),
            WarningSeverity::Low,
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_holiday_allowance".to_string(),
        rule_name: "Weekly Holiday Allowance".to_string(),
        legal_ref: WEEKLY_REST_REF.to_string(),
        input: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string(),
            "work_days": work_days.normalize().to_string(),
            "hours_per_week": rules.hours_per_week.normalize().to_string(),
            "standard_month_days": rules.standard_month_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_holiday_allowance": amount.normalize().to_string(),
            "source": AllowanceSource::Computed
        }),
        reasoning: format!(
            "floor({}원 x {} hours x {} / {} days) = {}원",
            hourly_wage.normalize(),
            rules.hours_per_week.normalize(),
            work_days.normalize(),
            rules.standard_month_days.normalize(),
            amount.normalize()
        ),
    };

    Ok(WeeklyAllowanceResult {
        amount,
        source: AllowanceSource::Computed,
        warnings,
        audit_step,
    })
}

fn caller_provided(
    amount: Decimal,
    hourly_wage: Decimal,
    work_days: Decimal,
    step_number: u32,
) -> WeeklyAllowanceResult {
    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_holiday_allowance".to_string(),
        rule_name: "Weekly Holiday Allowance".to_string(),
        legal_ref: WEEKLY_REST_REF.to_string(),
        input: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string(),
            "work_days": work_days.normalize().to_string(),
            "provided": amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_holiday_allowance": amount.normalize().to_string(),
            "source": AllowanceSource::CallerProvided
        }),
        reasoning: format!("Caller supplied {}원; used as entered", amount.normalize()),
    };

    WeeklyAllowanceResult {
        amount,
        source: AllowanceSource::CallerProvided,
        warnings: vec![AuditWarning::new(
            "CALLER_PROVIDED_ALLOWANCE",
            "Weekly holiday allowance was supplied by the caller and not recomputed",
            WarningSeverity::Low,
        )],
        audit_step,
    }
}
