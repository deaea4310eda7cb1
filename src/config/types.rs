//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the per-estate
//! [`PayPolicy`] and the jurisdiction-level [`StatutoryConfig`] with its
//! progressive [`TaxTable`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Pay-policy parameters configured by the estate administration.
///
/// A policy is immutable for the duration of a calculation call. Multipliers
/// apply to the hourly rate derived from `base_salary_of_month`; allowances
/// are flat monthly amounts (`child_allowance` is per child).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// The monthly statutory base salary.
    pub base_salary_of_month: Decimal,
    /// Rate multiplier for overtime hours (e.g. 1.4).
    pub overtime_multiplier: Decimal,
    /// Rate multiplier for night-work hours.
    pub night_work_multiplier: Decimal,
    /// Rate multiplier for holiday-work hours.
    pub holiday_work_multiplier: Decimal,
    /// Flat monthly allowance paid per child.
    pub child_allowance: Decimal,
    /// Flat monthly housing allowance.
    pub housing_allowance: Decimal,
    /// Flat monthly food allowance.
    pub food_allowance: Decimal,
    /// Insurance deduction as a percentage in [0, 100].
    pub insurance_deduction_percentage: Decimal,
    /// Grace period for lateness, in minutes.
    pub max_allowed_lateness: u32,
    /// Flat deduction applied when lateness exceeds the grace period.
    pub lateness_penalty_amount: Decimal,
    /// Contractual start of shift (`HH:MM`).
    pub default_entry_time: String,
    /// Contractual end of shift (`HH:MM`).
    pub default_exit_time: String,
}

/// A single progressive tax bracket.
///
/// Annual income above `threshold` (and below the next bracket's threshold)
/// is taxed at `rate`; `base` is the cumulative tax owed on all income up to
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Annual income above which this bracket's rate applies.
    pub threshold: Decimal,
    /// Marginal rate as a fraction (0.10 for 10%).
    pub rate: Decimal,
    /// Cumulative annual tax owed at `threshold`.
    pub base: Decimal,
}

/// An ascending, internally consistent table of tax brackets.
///
/// The first bracket's threshold doubles as the exemption threshold: annual
/// income at or below it is not taxed. Income above the last threshold is
/// taxed at the last bracket's rate without limit.
///
/// Construction validates that every `base` equals the true cumulative
/// progressive tax at its threshold, so the top-down shortcut formula used by
/// the tax calculator is equivalent to summing marginal amounts.
///
/// # Example
///
/// ```
/// use estate_payroll::config::TaxTable;
///
/// let table = TaxTable::default();
/// assert_eq!(table.brackets().len(), 4);
/// assert_eq!(table.exemption_threshold().to_string(), "1440000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxTable {
    brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Creates a validated tax table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxTable` if the table is empty, the first base is not
    /// zero, thresholds are not strictly ascending, a rate lies outside
    /// [0, 1], a value is negative, or a bracket's base disagrees with the
    /// cumulative tax of the bracket below it.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, EngineError> {
        if brackets.is_empty() {
            return Err(EngineError::InvalidTaxTable {
                message: "at least one bracket is required".to_string(),
            });
        }

        // No tax is owed at the exemption threshold.
        if brackets[0].base != Decimal::ZERO {
            return Err(EngineError::InvalidTaxTable {
                message: format!("bracket 0 base {} must be 0", brackets[0].base),
            });
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.threshold < Decimal::ZERO || bracket.base < Decimal::ZERO {
                return Err(EngineError::InvalidTaxTable {
                    message: format!("bracket {} has a negative threshold or base", index),
                });
            }
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidTaxTable {
                    message: format!(
                        "bracket {} rate {} is outside [0, 1]",
                        index, bracket.rate
                    ),
                });
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.threshold <= lower.threshold {
                return Err(EngineError::InvalidTaxTable {
                    message: format!(
                        "bracket {} threshold {} is not above {}",
                        index + 1,
                        upper.threshold,
                        lower.threshold
                    ),
                });
            }

            let expected = cumulative_base(&lower, upper.threshold).ok_or_else(|| {
                EngineError::InvalidTaxTable {
                    message: format!("bracket {} cumulative tax is too large", index + 1),
                }
            })?;
            if upper.base != expected {
                return Err(EngineError::InvalidTaxTable {
                    message: format!(
                        "bracket {} base {} does not match cumulative tax {}",
                        index + 1,
                        upper.base,
                        expected.normalize()
                    ),
                });
            }
        }

        Ok(Self { brackets })
    }

    /// Builds a table from `(threshold, rate)` bands, deriving each base.
    ///
    /// The first band's base is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use estate_payroll::config::TaxTable;
    /// use rust_decimal::Decimal;
    ///
    /// let table = TaxTable::from_bands(&[
    ///     (Decimal::new(1000, 0), Decimal::new(10, 2)),
    ///     (Decimal::new(2000, 0), Decimal::new(20, 2)),
    /// ])
    /// .unwrap();
    /// assert_eq!(table.brackets()[1].base, Decimal::new(100, 0));
    /// ```
    pub fn from_bands(bands: &[(Decimal, Decimal)]) -> Result<Self, EngineError> {
        let mut brackets: Vec<TaxBracket> = Vec::with_capacity(bands.len());
        for &(threshold, rate) in bands {
            let base = match brackets.last() {
                Some(lower) => cumulative_base(lower, threshold).ok_or_else(|| {
                    EngineError::InvalidTaxTable {
                        message: format!("bracket {} cumulative tax is too large", brackets.len()),
                    }
                })?,
                None => Decimal::ZERO,
            };
            brackets.push(TaxBracket {
                threshold,
                rate,
                base,
            });
        }
        Self::new(brackets)
    }

    /// Returns the brackets in ascending threshold order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the annual income at or below which no tax is owed.
    pub fn exemption_threshold(&self) -> Decimal {
        self.brackets[0].threshold
    }
}

impl Default for TaxTable {
    /// The four statutory brackets B0 to B3.
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket {
                    threshold: Decimal::new(1_440_000_000, 0),
                    rate: Decimal::new(10, 2),
                    base: Decimal::ZERO,
                },
                TaxBracket {
                    threshold: Decimal::new(1_980_000_000, 0),
                    rate: Decimal::new(15, 2),
                    base: Decimal::new(54_000_000, 0),
                },
                TaxBracket {
                    threshold: Decimal::new(3_240_000_000, 0),
                    rate: Decimal::new(20, 2),
                    base: Decimal::new(243_000_000, 0),
                },
                TaxBracket {
                    threshold: Decimal::new(4_800_000_000, 0),
                    rate: Decimal::new(30, 2),
                    base: Decimal::new(555_000_000, 0),
                },
            ],
        }
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxTable> for Vec<TaxBracket> {
    fn from(table: TaxTable) -> Self {
        table.brackets
    }
}

/// Cumulative tax at `threshold` when `lower` is the bracket below it.
fn cumulative_base(lower: &TaxBracket, threshold: Decimal) -> Option<Decimal> {
    threshold
        .checked_sub(lower.threshold)?
        .checked_mul(lower.rate)?
        .checked_add(lower.base)
}

/// The default number of standard working hours in a month.
pub const DEFAULT_STANDARD_MONTHLY_HOURS: Decimal = Decimal::from_parts(220, 0, 0, false, 0);

fn default_standard_monthly_hours() -> Decimal {
    DEFAULT_STANDARD_MONTHLY_HOURS
}

/// Jurisdiction-level constants that vary by country or tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConfig {
    /// Divisor turning the monthly base salary into an hourly rate.
    #[serde(default = "default_standard_monthly_hours")]
    pub standard_monthly_hours: Decimal,
    /// Progressive annual income-tax brackets.
    #[serde(default)]
    pub tax_brackets: TaxTable,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self {
            standard_monthly_hours: DEFAULT_STANDARD_MONTHLY_HOURS,
            tax_brackets: TaxTable::default(),
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Default pay policy used when a request or the store supplies none.
    policy: PayPolicy,
    /// Statutory constants.
    statutory: StatutoryConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(policy: PayPolicy, statutory: StatutoryConfig) -> Self {
        Self { policy, statutory }
    }

    /// Returns the default pay policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Returns the statutory constants.
    pub fn statutory(&self) -> &StatutoryConfig {
        &self.statutory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_table_bases_are_consistent() {
        let defaults = TaxTable::default();
        let rebuilt = TaxTable::new(defaults.brackets().to_vec());
        assert!(rebuilt.is_ok(), "default table rejected: {:?}", rebuilt.err());
    }

    #[test]
    fn test_from_bands_derives_default_bases() {
        let table = TaxTable::from_bands(&[
            (dec("1440000000"), dec("0.10")),
            (dec("1980000000"), dec("0.15")),
            (dec("3240000000"), dec("0.20")),
            (dec("4800000000"), dec("0.30")),
        ])
        .unwrap();

        let bases: Vec<Decimal> = table.brackets().iter().map(|b| b.base).collect();
        assert_eq!(
            bases,
            vec![dec("0"), dec("54000000"), dec("243000000"), dec("555000000")]
        );
    }

    #[test]
    fn test_inconsistent_base_is_rejected() {
        let mut brackets = TaxTable::default().brackets().to_vec();
        brackets[2].base = dec("250000000");

        match TaxTable::new(brackets) {
            Err(EngineError::InvalidTaxTable { message }) => {
                assert!(message.contains("bracket 2"));
            }
            other => panic!("Expected InvalidTaxTable, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_first_base_is_rejected() {
        let mut brackets = TaxTable::default().brackets().to_vec();
        brackets[0].base = dec("500");

        match TaxTable::new(brackets) {
            Err(EngineError::InvalidTaxTable { message }) => {
                assert!(message.contains("bracket 0 base 500"));
            }
            other => panic!("Expected InvalidTaxTable, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_cumulative_base_is_rejected() {
        // Bases are derived before rates are checked.
        let result = TaxTable::from_bands(&[(Decimal::ZERO, dec("10")), (Decimal::MAX, dec("0.1"))]);

        match result {
            Err(EngineError::InvalidTaxTable { message }) => assert!(message.contains("too large")),
            other => panic!("Expected InvalidTaxTable, got {:?}", other),
        }
    }

    #[test]
    fn test_descending_thresholds_are_rejected() {
        let result = TaxTable::new(vec![
            TaxBracket {
                threshold: dec("2000"),
                rate: dec("0.1"),
                base: dec("0"),
            },
            TaxBracket {
                threshold: dec("1000"),
                rate: dec("0.2"),
                base: dec("0"),
            },
        ]);
        assert!(matches!(result, Err(EngineError::InvalidTaxTable { .. })));
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let result = TaxTable::from_bands(&[(dec("1000"), dec("1.5"))]);
        assert!(matches!(result, Err(EngineError::InvalidTaxTable { .. })));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(TaxTable::new(vec![]).is_err());
    }

    #[test]
    fn test_tax_table_deserialization_validates() {
        let yaml = r#"
- threshold: 1000
  rate: 0.1
  base: 0
- threshold: 2000
  rate: 0.2
  base: 999
"#;
        let result: Result<TaxTable, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_statutory_defaults_apply_when_fields_missing() {
        let statutory: StatutoryConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(statutory.standard_monthly_hours, dec("220"));
        assert_eq!(statutory.tax_brackets, TaxTable::default());
    }
}
