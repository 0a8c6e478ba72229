//! Core data models for the wage statement engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod salary;
mod work_period;

pub use audit::{AuditStep, AuditTrace, AuditWarning, WarningSeverity};
pub use salary::{AllowanceSource, SalaryCalculation, SalaryInput};
pub use work_period::{Holiday, WorkPeriod};
