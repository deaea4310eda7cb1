//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayPolicy, PayrollConfig, StatutoryConfig};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides access to the default pay policy and statutory constants.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml     # Default pay policy
/// └── statutory.yaml  # Standard monthly hours and tax brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use estate_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Standard hours: {}", loader.statutory().standard_monthly_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or a non-positive standard-hours
    ///   divisor (`ConfigParseError`)
    /// - The tax brackets are inconsistent (`ConfigParseError` wrapping the
    ///   table validation message)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PayPolicy>(&policy_path)?;

        let statutory_path = path.join("statutory.yaml");
        let statutory = Self::load_yaml::<StatutoryConfig>(&statutory_path)?;

        if statutory.standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: statutory_path.display().to_string(),
                message: "standard_monthly_hours must be positive".to_string(),
            });
        }

        tracing::debug!(
            path = %path.display(),
            brackets = statutory.tax_brackets.brackets().len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(policy, statutory),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
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

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the default pay policy.
    pub fn policy(&self) -> &PayPolicy {
        self.config.policy()
    }

    /// Returns the statutory constants.
    pub fn statutory(&self) -> &StatutoryConfig {
        self.config.statutory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxTable;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "estate_payroll_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.statutory().standard_monthly_hours, dec("220"));
        assert_eq!(loader.statutory().tax_brackets, TaxTable::default());
    }

    #[test]
    fn test_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.policy();

        assert_eq!(policy.base_salary_of_month, dec("71661840"));
        assert_eq!(policy.overtime_multiplier, dec("1.4"));
        assert_eq!(policy.insurance_deduction_percentage, dec("7"));
        assert_eq!(policy.max_allowed_lateness, 15);
        assert_eq!(policy.default_entry_time, "08:00");
        assert_eq!(policy.default_exit_time, "16:00");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_inconsistent_brackets_fail_to_load() {
        let dir = scratch_dir("bad_brackets");
        fs::copy(
            Path::new(config_path()).join("policy.yaml"),
            dir.join("policy.yaml"),
        )
        .unwrap();
        fs::write(
            dir.join("statutory.yaml"),
            "standard_monthly_hours: 220\ntax_brackets:\n  - { threshold: 100, rate: 0.1, base: 0 }\n  - { threshold: 200, rate: 0.2, base: 50 }\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("statutory.yaml"));
                assert!(message.contains("cumulative tax"), "got: {}", message);
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_standard_hours_fail_to_load() {
        let dir = scratch_dir("zero_hours");
        fs::copy(
            Path::new(config_path()).join("policy.yaml"),
            dir.join("policy.yaml"),
        )
        .unwrap();
        fs::write(dir.join("statutory.yaml"), "standard_monthly_hours: 0\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_from_config_uses_given_statutory() {
        let base = ConfigLoader::load(config_path()).unwrap();
        let statutory = StatutoryConfig {
            standard_monthly_hours: dec("192"),
            ..StatutoryConfig::default()
        };

        let loader = ConfigLoader::from_config(PayrollConfig::new(base.policy().clone(), statutory));

        assert_eq!(loader.statutory().standard_monthly_hours, dec("192"));
        assert_eq!(loader.policy(), base.policy());
    }
}
