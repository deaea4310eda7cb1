//! Eager validation of payroll inputs.
//!
//! Runs before any arithmetic so that bad data fails with the offending
//! field named instead of producing a plausible-looking but wrong payroll.
//! Time strings are deliberately left alone; the lateness step handles them.

use rust_decimal::Decimal;

use crate::config::{PayPolicy, StatutoryConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollInput;

/// Validates a payroll input against the numeric domain of each field.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first field that is negative where it
/// must not be, a multiplier that is not positive, a percentage outside
/// [0, 100], or a non-positive `standard_monthly_hours`.
pub fn validate_payroll_input(input: &PayrollInput, statutory: &StatutoryConfig) -> EngineResult<()> {
    if statutory.standard_monthly_hours <= Decimal::ZERO {
        return Err(invalid(
            "standard_monthly_hours",
            format!("must be positive, got {}", statutory.standard_monthly_hours),
        ));
    }

    let hours = &input.hours;
    require_non_negative(&[
        ("total_hours_worked", hours.total_hours_worked),
        ("total_overtime_hours", hours.total_overtime_hours),
        ("total_holiday_hours", hours.total_holiday_hours),
        ("total_night_work_hours", hours.total_night_work_hours),
        ("other_deductions", input.other_deductions),
    ])?;

    validate_pay_policy(&input.policy)
}

/// Validates the numeric fields of a pay policy.
///
/// Used on its own when a policy is stored, so a stored policy can always be
/// calculated with.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first amount that is negative, the
/// first multiplier that is not positive, or a percentage outside [0, 100].
pub fn validate_pay_policy(policy: &PayPolicy) -> EngineResult<()> {
    require_non_negative(&[
        ("base_salary_of_month", policy.base_salary_of_month),
        ("child_allowance", policy.child_allowance),
        ("housing_allowance", policy.housing_allowance),
        ("food_allowance", policy.food_allowance),
        ("lateness_penalty_amount", policy.lateness_penalty_amount),
    ])?;

    let multipliers = [
        ("overtime_multiplier", policy.overtime_multiplier),
        ("night_work_multiplier", policy.night_work_multiplier),
        ("holiday_work_multiplier", policy.holiday_work_multiplier),
    ];
    for (field, value) in multipliers {
        if value <= Decimal::ZERO {
            return Err(invalid(field, format!("must be positive, got {}", value)));
        }
    }

    let percentage = policy.insurance_deduction_percentage;
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(invalid(
            "insurance_deduction_percentage",
            format!("must be between 0 and 100, got {}", percentage),
        ));
    }

    Ok(())
}

fn require_non_negative(values: &[(&str, Decimal)]) -> EngineResult<()> {
    for &(field, value) in values {
        if value < Decimal::ZERO {
            return Err(invalid(field, format!("must not be negative, got {}", value)));
        }
    }
    Ok(())
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyHourTotals;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input() -> PayrollInput {
        PayrollInput {
            policy: PayPolicy {
                base_salary_of_month: dec("71661840"),
                overtime_multiplier: dec("1.4"),
                night_work_multiplier: dec("1.35"),
                holiday_work_multiplier: dec("1.4"),
                child_allowance: dec("7166184"),
                housing_allowance: dec("9000000"),
                food_allowance: dec("14000000"),
                insurance_deduction_percentage: dec("7"),
                max_allowed_lateness: 15,
                lateness_penalty_amount: dec("500000"),
                default_entry_time: "08:00".to_string(),
                default_exit_time: "16:00".to_string(),
            },
            hours: MonthlyHourTotals {
                total_hours_worked: dec("220"),
                ..MonthlyHourTotals::default()
            },
            children_count: 2,
            other_deductions: Decimal::ZERO,
            entry_time: "08:00".to_string(),
        }
    }

    fn field_of(result: EngineResult<()>) -> String {
        match result {
            Err(EngineError::InvalidInput { field, .. }) => field,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_payroll_input(&create_test_input(), &StatutoryConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let mut input = create_test_input();
        input.hours.total_night_work_hours = dec("-0.5");

        let field = field_of(validate_payroll_input(&input, &StatutoryConfig::default()));
        assert_eq!(field, "total_night_work_hours");
    }

    #[test]
    fn test_negative_other_deductions_rejected() {
        let mut input = create_test_input();
        input.other_deductions = dec("-1");

        let field = field_of(validate_payroll_input(&input, &StatutoryConfig::default()));
        assert_eq!(field, "other_deductions");
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let mut input = create_test_input();
        input.policy.holiday_work_multiplier = Decimal::ZERO;

        let field = field_of(validate_payroll_input(&input, &StatutoryConfig::default()));
        assert_eq!(field, "holiday_work_multiplier");
    }

    #[test]
    fn test_percentage_bounds() {
        let mut input = create_test_input();
        input.policy.insurance_deduction_percentage = dec("100");
        assert!(validate_payroll_input(&input, &StatutoryConfig::default()).is_ok());

        input.policy.insurance_deduction_percentage = dec("100.01");
        let field = field_of(validate_payroll_input(&input, &StatutoryConfig::default()));
        assert_eq!(field, "insurance_deduction_percentage");
    }

    #[test]
    fn test_zero_standard_hours_rejected() {
        let statutory = StatutoryConfig {
            standard_monthly_hours: Decimal::ZERO,
            ..StatutoryConfig::default()
        };

        let field = field_of(validate_payroll_input(&create_test_input(), &statutory));
        assert_eq!(field, "standard_monthly_hours");
    }

    #[test]
    fn test_policy_checked_on_its_own() {
        let mut policy = create_test_input().policy;
        assert!(validate_pay_policy(&policy).is_ok());

        policy.overtime_multiplier = Decimal::ZERO;
        assert_eq!(field_of(validate_pay_policy(&policy)), "overtime_multiplier");

        policy.overtime_multiplier = dec("1.4");
        policy.lateness_penalty_amount = dec("-500000");
        assert_eq!(field_of(validate_pay_policy(&policy)), "lateness_penalty_amount");
    }

    #[test]
    fn test_malformed_entry_time_is_not_rejected() {
        let mut input = create_test_input();
        input.entry_time = "not a time".to_string();

        assert!(validate_payroll_input(&input, &StatutoryConfig::default()).is_ok());
    }
}
