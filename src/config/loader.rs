//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine rules
//! and holiday tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calendar::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineRules, HolidayYearConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kr_hourly/
/// ├── rules.yaml          # Work hours, weekly rest, withholding, calendar policy
/// └── holidays/
///     └── 2025.yaml       # Holidays for one year
/// ```
///
/// # Example
///
/// ```no_run
/// use wage_statement::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kr_hourly").unwrap();
/// println!("Holiday years: {:?}", loader.calendar().years().collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: EngineRules,
    calendar: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kr_hourly")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `rules.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - A holiday file lists a date outside its year, or two files claim the same year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<EngineRules>(&path.join("rules.yaml"))?;
        let calendar = Self::load_holidays(&path.join("holidays"))?;

        info!(
            path = %path.display(),
            years = ?calendar.years().collect::<Vec<_>>(),
            "Loaded wage statement configuration"
        );

        Ok(Self { rules, calendar })
    }

    /// Creates a loader from values built in memory.
    pub fn from_parts(rules: EngineRules, calendar: HolidayCalendar) -> Self {
        Self { rules, calendar }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<HolidayCalendar> {
        let holidays_dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut calendar = HolidayCalendar::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let year_config = Self::load_yaml::<HolidayYearConfig>(&path)?;
            let path_str = path.display().to_string();

            if calendar.covers(year_config.year) {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: format!("year {} is defined more than once", year_config.year),
                });
            }

            calendar
                .insert_year(year_config.year, year_config.holidays)
                .map_err(|e| EngineError::ConfigParseError {
                    path: path_str,
                    message: e.to_string(),
                })?;
        }

        Ok(calendar)
    }

    /// Returns the engine rules.
    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuralTaxBasis, UnknownYearPolicy};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn config_path() -> &'static str {
        "./config/kr_hourly"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A scratch config directory, removed when dropped.
    fn scratch_dir(rules: &str, holidays: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("holidays")).unwrap();
        fs::write(dir.path().join("rules.yaml"), rules).unwrap();
        for (name, content) in holidays {
            fs::write(dir.path().join("holidays").join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(loader.calendar().covers(2025));
        assert_eq!(loader.rules(), &EngineRules::default());
    }

    #[test]
    fn test_shipped_rules_values() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rules = loader.rules();
        assert_eq!(rules.withholding.income_tax_rate, dec("0.03"));
        assert_eq!(rules.withholding.rural_tax_rate, dec("0.003"));
        assert_eq!(rules.withholding.rural_tax_basis, RuralTaxBasis::GrossSalary);
        assert_eq!(rules.weekly_rest.hours_per_week, dec("8"));
        assert_eq!(rules.calendar.unknown_year, UnknownYearPolicy::Reject);
    }

    #[test]
    fn test_shipped_2025_holidays() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let dates = loader.calendar().holiday_dates(2025).unwrap();
        assert_eq!(dates.len(), 12);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()));
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("rules.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_holidays_directory_returns_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.yaml"), "{}\n").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("holidays")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("withholding: [not, a, map]\n", &[]);
        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_holiday_outside_year_returns_parse_error() {
        let dir = scratch_dir(
            "{}\n",
            &[("2026.yaml", "year: 2026\nholidays:\n  - date: 2025-12-25\n    name: 크리스마스\n")],
        );
        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("2026.yaml"));
                assert!(message.contains("2025-12-25"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_year_returns_parse_error() {
        let table = "year: 2026\nholidays: []\n";
        let dir = scratch_dir("{}\n", &[("a.yaml", table), ("b.yaml", table)]);
        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_non_yaml_files_are_ignored() {
        let dir = scratch_dir(
            "calendar:\n  unknown_year: weekends_only\n",
            &[("README.txt", "not yaml: ["), ("2026.yaml", "year: 2026\nholidays: []\n")],
        );
        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert!(loader.calendar().covers(2026));
        assert_eq!(
            loader.rules().calendar.unknown_year,
            UnknownYearPolicy::WeekendsOnly
        );
    }

    #[test]
    fn test_scratch_dir_is_removed_after_failed_load() {
        let path = {
            let dir = scratch_dir("withholding: [not, a, map]\n", &[]);
            assert!(ConfigLoader::load(dir.path()).is_err());
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_from_parts() {
        let loader = ConfigLoader::from_parts(EngineRules::default(), HolidayCalendar::new());
        assert!(!loader.calendar().covers(2025));
    }
}
