//! Calculation logic for the wage statement engine.
//!
//! Each rule lives in its own module and returns its value together with an
//! audit step: work hours, base salary, the weekly-rest allowance and
//! withholding. [`calculate_salary`] chains them into a statement.

mod base_salary;
mod salary;
mod weekly_allowance;
mod withholding;
mod work_hours;

pub use base_salary::{BASE_SALARY_REF, BaseSalaryResult, calculate_base_salary};
pub use salary::{TracedCalculation, calculate_salary, calculate_salary_with_trace, reconciles};
pub use weekly_allowance::{WEEKLY_REST_REF, WeeklyAllowanceResult, calculate_weekly_allowance};
pub use withholding::{
    WITHHOLDING_REF, WithholdingResult, calculate_withholding, truncate_to_unit,
};
pub use work_hours::{
    WORK_HOURS_REF, WorkHoursResult, extra_hours, resolve_work_hours, suggested_work_hours,
};
