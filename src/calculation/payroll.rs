//! The payroll engine.
//!
//! [`calculate_payroll`] chains the individual calculation steps in a fixed
//! order and assembles an itemized [`PayrollResult`] with its audit trace:
//!
//! 1. Hourly rate
//! 2. Hour-based pay components
//! 3. Allowances
//! 4. Gross pay
//! 5. Lateness deduction
//! 6. Insurance deduction
//! 7. Income tax
//! 8. Net pay
//!
//! The engine is a pure function: no I/O, no clock, no randomness.

use rust_decimal::Decimal;
use tracing::debug;

use super::allowances::calculate_allowances;
use super::hourly_rate::calculate_hourly_rate;
use super::insurance::calculate_insurance;
use super::lateness::calculate_lateness_deduction;
use super::net_pay::calculate_net_pay;
use super::pay_components::calculate_pay_components;
use super::tax::calculate_tax;
use super::validation::validate_payroll_input;
use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, PayrollInput, PayrollResult};

/// Calculates a complete payroll for one employee and one month.
///
/// # Errors
///
/// Returns `InvalidInput` if validation fails or an amount does not fit in a
/// `Decimal`, naming the field that overflowed. A malformed `entry_time` is
/// not an error; it yields no lateness deduction and an
/// `INVALID_TIME_FORMAT` warning in the audit trace.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_payroll;
/// use estate_payroll::config::{PayPolicy, StatutoryConfig};
/// use estate_payroll::models::{MonthlyHourTotals, PayrollInput};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     policy: PayPolicy {
///         base_salary_of_month: Decimal::from(71_661_840),
///         overtime_multiplier: Decimal::new(14, 1),
///         night_work_multiplier: Decimal::new(135, 2),
///         holiday_work_multiplier: Decimal::new(14, 1),
///         child_allowance: Decimal::ZERO,
///         housing_allowance: Decimal::ZERO,
///         food_allowance: Decimal::ZERO,
///         insurance_deduction_percentage: Decimal::from(7),
///         max_allowed_lateness: 15,
///         lateness_penalty_amount: Decimal::from(500_000),
///         default_entry_time: "08:00".to_string(),
///         default_exit_time: "16:00".to_string(),
///     },
///     hours: MonthlyHourTotals {
///         total_hours_worked: Decimal::from(220),
///         ..MonthlyHourTotals::default()
///     },
///     children_count: 0,
///     other_deductions: Decimal::ZERO,
///     entry_time: "08:00".to_string(),
/// };
///
/// let result = calculate_payroll(&input, &StatutoryConfig::default()).unwrap();
/// assert_eq!(result.gross_pay, Decimal::from(71_661_840));
/// assert_eq!(result.net_pay, Decimal::new(666_455_112, 1));
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    statutory: &StatutoryConfig,
) -> EngineResult<PayrollResult> {
    validate_payroll_input(input, statutory)?;

    let policy = &input.policy;
    let mut trace = AuditTrace::default();

    let hourly = calculate_hourly_rate(
        policy.base_salary_of_month,
        statutory.standard_monthly_hours,
        1,
    )?;
    trace.steps.push(hourly.audit_step);

    let components = calculate_pay_components(&input.hours, &hourly.rate, policy, 2)?;
    trace.steps.push(components.audit_step.clone());

    let allowances = calculate_allowances(input.children_count, policy, 3)?;
    trace.steps.push(allowances.audit_step);

    let gross_pay = checked_sum(
        "gross_pay",
        &[
            components.base_salary_pay,
            components.overtime_pay,
            components.holiday_pay,
            components.night_work_pay,
            allowances.child_allowance,
            allowances.housing_allowance,
            allowances.food_allowance,
        ],
    )?;
    trace.steps.push(gross_pay_step(gross_pay, components.insurable_income, 4));

    let lateness = calculate_lateness_deduction(&input.entry_time, policy, 5);
    trace.steps.push(lateness.audit_step);
    if let Some(warning) = lateness.warning {
        trace.warnings.push(warning);
    }

    let insurance = calculate_insurance(
        components.insurable_income,
        policy.insurance_deduction_percentage,
        6,
    )?;
    trace.steps.push(insurance.audit_step);

    let tax = calculate_tax(gross_pay, &statutory.tax_brackets, 7)?;
    trace.steps.push(tax.audit_step);

    let total_deductions = checked_sum(
        "total_deductions",
        &[
            insurance.deduction,
            tax.monthly_tax,
            lateness.deduction,
            input.other_deductions,
        ],
    )?;
    let net = calculate_net_pay(gross_pay, total_deductions, 8);
    trace.steps.push(net.audit_step);
    if let Some(warning) = net.warning {
        trace.warnings.push(warning);
    }

    debug!(
        gross_pay = %gross_pay,
        net_pay = %net.net_pay,
        net_pay_floored = net.floored,
        warnings = trace.warnings.len(),
        "Payroll calculated"
    );

    Ok(PayrollResult {
        base_salary_pay: components.base_salary_pay,
        overtime_pay: components.overtime_pay,
        holiday_pay: components.holiday_pay,
        night_work_pay: components.night_work_pay,
        child_allowance: allowances.child_allowance,
        housing_allowance: allowances.housing_allowance,
        food_allowance: allowances.food_allowance,
        gross_pay,
        insurance_deduction: insurance.deduction,
        tax_deduction: tax.monthly_tax,
        lateness_deduction: lateness.deduction,
        other_deductions: input.other_deductions,
        net_pay: net.net_pay,
        net_pay_floored: net.floored,
        audit_trace: trace,
    })
}

fn checked_sum(field: &str, amounts: &[Decimal]) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .ok_or_else(|| EngineError::amount_too_large(field))
}

fn gross_pay_step(gross_pay: Decimal, hour_based_pay: Decimal, step_number: u32) -> AuditStep {
    let allowances = gross_pay - hour_based_pay;
    AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "hour_based_pay": hour_based_pay.normalize().to_string(),
            "allowances": allowances.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} hour-based pay + {} allowances = {}",
            hour_based_pay.normalize(),
            allowances.normalize(),
            gross_pay.normalize()
        ),
    }
}
