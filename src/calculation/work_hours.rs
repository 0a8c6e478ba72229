//! Work-hours resolution.
//!
//! The part-time schedule is four hours a day, so a month's hours default to
//! `work_days * default_daily_hours`. Whether the caller's figure or the
//! derived one is authoritative is decided by [`WorkHoursPolicy`].

use rust_decimal::Decimal;

use crate::config::{WorkHoursPolicy, WorkHoursRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, SalaryInput};

/// Reference for the agreed daily schedule.
pub const WORK_HOURS_REF: &str = "근로기준법 제17조 (근로조건의 명시)";

/// The result of resolving work hours, including the audit step.
#[derive(Debug, Clone)]
pub struct WorkHoursResult {
    /// The hours used for the base salary.
    pub work_hours: Decimal,
    /// `work_days * default_daily_hours`.
    pub suggested_hours: Decimal,
    /// `work_hours - suggested_hours` (기타가감).
    pub extra_hours: Decimal,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// The default hours for a number of work days.
///
/// # Example
///
/// ```
/// use wage_statement::calculation::suggested_work_hours;
/// use wage_statement::config::WorkHoursRules;
/// use rust_decimal::Decimal;
///
/// let hours = suggested_work_hours(Decimal::from(22), &WorkHoursRules::default());
/// assert_eq!(hours, Decimal::from(88));
/// ```
pub fn suggested_work_hours(work_days: Decimal, rules: &WorkHoursRules) -> Decimal {
    work_days * rules.default_daily_hours
}

/// The difference between the hours worked and the default for the days worked.
///
/// Positive when more hours were worked than the schedule implies.
pub fn extra_hours(work_hours: Decimal, work_days: Decimal, rules: &WorkHoursRules) -> Decimal {
    work_hours - suggested_work_hours(work_days, rules)
}

/// Determines the work hours for a salary input under the configured policy.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for field `work_hours` when:
/// - the policy is `explicit` and no hours were supplied
/// - the policy is `derived_from_days` and the supplied hours disagree with
///   the derived value
pub fn resolve_work_hours(
    input: &SalaryInput,
    rules: &WorkHoursRules,
    step_number: u32,
) -> EngineResult<WorkHoursResult> {
    let suggested_hours = suggested_work_hours(input.work_days, rules);

    let work_hours = match (rules.policy, input.work_hours) {
        (WorkHoursPolicy::Explicit, Some(hours)) => hours,
        (WorkHoursPolicy::Explicit, None) => {
            return Err(EngineError::invalid_input(
                "work_hours",
                "is required when work hours are entered explicitly",
            ));
        }
        (WorkHoursPolicy::DerivedFromDays, None) => suggested_hours,
        (WorkHoursPolicy::DerivedFromDays, Some(hours)) if hours == suggested_hours => hours,
        (WorkHoursPolicy::DerivedFromDays, Some(hours)) => {
            return Err(EngineError::invalid_input(
                "work_hours",
                format!(
                    "{} does not match {} days x {} hours = {}",
                    hours.normalize(),
                    input.work_days.normalize(),
                    rules.default_daily_hours.normalize(),
                    suggested_hours.normalize()
                ),
            ));
        }
    };

    let extra = work_hours - suggested_hours;

    let reasoning = match rules.policy {
        WorkHoursPolicy::Explicit if extra.is_zero() => format!(
            "{} hours entered, matching {} days x {} hours",
            work_hours.normalize(),
            input.work_days.normalize(),
            rules.default_daily_hours.normalize()
        ),
        WorkHoursPolicy::Explicit => format!(
            "{} hours entered ({:+} against {} days x {} hours)",
            work_hours.normalize(),
            extra.normalize(),
            input.work_days.normalize(),
            rules.default_daily_hours.normalize()
        ),
        WorkHoursPolicy::DerivedFromDays => format!(
            "{} days x {} hours = {} hours",
            input.work_days.normalize(),
            rules.default_daily_hours.normalize(),
            work_hours.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "work_hours".to_string(),
        rule_name: "Work Hours".to_string(),
        legal_ref: WORK_HOURS_REF.to_string(),
        input: serde_json::json!({
            "work_days": input.work_days.normalize().to_string(),
            "work_hours": input.work_hours.map(|h| h.normalize().to_string()),
            "default_daily_hours": rules.default_daily_hours.normalize().to_string(),
            "policy": rules.policy
        }),
        output: serde_json::json!({
            "work_hours": work_hours.normalize().to_string(),
            "extra_hours": extra.normalize().to_string()
        }),
        reasoning,
    };

    Ok(WorkHoursResult {
        work_hours,
        suggested_hours,
        extra_hours: extra,
        audit_step,
    })
}
