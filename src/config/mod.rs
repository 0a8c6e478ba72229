//! Configuration loading and management for the wage statement engine.
//!
//! This module loads the engine rules (daily hours, weekly-rest proration,
//! withholding rates and rounding, calendar policy) and the per-year holiday
//! tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use wage_statement::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr_hourly").unwrap();
//! println!("Income tax rate: {}", config.rules().withholding.income_tax_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowancePolicy, CalendarRules, EngineRules, HolidayYearConfig, RuralTaxBasis,
    UnknownYearPolicy, WeeklyRestRules, WithholdingRules, WorkHoursPolicy, WorkHoursRules,
};
