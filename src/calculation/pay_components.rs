//! Hour-based pay components.
//!
//! This module turns the month's hour totals into base, overtime, holiday,
//! and night-work pay using the derived hourly rate and the policy's
//! multipliers.

use rust_decimal::Decimal;

use super::hourly_rate::HourlyRate;
use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MonthlyHourTotals};

/// The hour-based pay components of a payroll.
#[derive(Debug, Clone)]
pub struct PayComponentsResult {
    /// `total_hours_worked * hourly_rate`.
    pub base_salary_pay: Decimal,
    /// `total_overtime_hours * hourly_rate * overtime_multiplier`.
    pub overtime_pay: Decimal,
    /// `total_holiday_hours * hourly_rate * holiday_work_multiplier`.
    pub holiday_pay: Decimal,
    /// `total_night_work_hours * hourly_rate * night_work_multiplier`.
    pub night_work_pay: Decimal,
    /// Income subject to insurance: all hour-based pay, no allowances.
    pub insurable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the four hour-based pay components.
///
/// # Errors
///
/// Returns `InvalidInput` naming the hour total whose pay, or the insurable
/// income sum, does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::{HourlyRate, calculate_pay_components};
/// use estate_payroll::config::PayPolicy;
/// use estate_payroll::models::MonthlyHourTotals;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy {
///     base_salary_of_month: Decimal::from(2200),
///     overtime_multiplier: Decimal::new(14, 1),
///     night_work_multiplier: Decimal::new(135, 2),
///     holiday_work_multiplier: Decimal::new(14, 1),
///     child_allowance: Decimal::ZERO,
///     housing_allowance: Decimal::ZERO,
///     food_allowance: Decimal::ZERO,
///     insurance_deduction_percentage: Decimal::ZERO,
///     max_allowed_lateness: 0,
///     lateness_penalty_amount: Decimal::ZERO,
///     default_entry_time: "08:00".to_string(),
///     default_exit_time: "16:00".to_string(),
/// };
/// let hours = MonthlyHourTotals {
///     total_hours_worked: Decimal::from(100),
///     total_overtime_hours: Decimal::from(10),
///     ..MonthlyHourTotals::default()
/// };
///
/// let rate = HourlyRate::new(policy.base_salary_of_month, Decimal::from(220)).unwrap();
/// let result = calculate_pay_components(&hours, &rate, &policy, 1).unwrap();
/// assert_eq!(result.base_salary_pay, Decimal::from(1000));
/// assert_eq!(result.overtime_pay, Decimal::from(140));
/// ```
pub fn calculate_pay_components(
    hours: &MonthlyHourTotals,
    rate: &HourlyRate,
    policy: &PayPolicy,
    step_number: u32,
) -> EngineResult<PayComponentsResult> {
    let pay = |hours: Decimal, multiplier: Decimal, field: &str| {
        rate.pay_for(hours, multiplier)
            .ok_or_else(|| EngineError::amount_too_large(field))
    };
    let base_salary_pay = pay(hours.total_hours_worked, Decimal::ONE, "total_hours_worked")?;
    let overtime_pay = pay(
        hours.total_overtime_hours,
        policy.overtime_multiplier,
        "total_overtime_hours",
    )?;
    let holiday_pay = pay(
        hours.total_holiday_hours,
        policy.holiday_work_multiplier,
        "total_holiday_hours",
    )?;
    let night_work_pay = pay(
        hours.total_night_work_hours,
        policy.night_work_multiplier,
        "total_night_work_hours",
    )?;
    let insurable_income = base_salary_pay
        .checked_add(overtime_pay)
        .and_then(|sum| sum.checked_add(night_work_pay))
        .and_then(|sum| sum.checked_add(holiday_pay))
        .ok_or_else(|| EngineError::amount_too_large("insurable_income"))?;
    let hourly_rate = rate.value().round_dp(4);

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_components".to_string(),
        rule_name: "Hour-Based Pay".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "total_hours_worked": hours.total_hours_worked.normalize().to_string(),
            "total_overtime_hours": hours.total_overtime_hours.normalize().to_string(),
            "total_holiday_hours": hours.total_holiday_hours.normalize().to_string(),
            "total_night_work_hours": hours.total_night_work_hours.normalize().to_string(),
            "overtime_multiplier": policy.overtime_multiplier.normalize().to_string(),
            "holiday_work_multiplier": policy.holiday_work_multiplier.normalize().to_string(),
            "night_work_multiplier": policy.night_work_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_salary_pay": base_salary_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "holiday_pay": holiday_pay.normalize().to_string(),
            "night_work_pay": night_work_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{}h x {} = {}; overtime {}h x {} x {} = {}; holiday {}h x {} x {} = {}; night {}h x {} x {} = {}",
            hours.total_hours_worked.normalize(),
            hourly_rate.normalize(),
            base_salary_pay.normalize(),
            hours.total_overtime_hours.normalize(),
            hourly_rate.normalize(),
            policy.overtime_multiplier.normalize(),
            overtime_pay.normalize(),
            hours.total_holiday_hours.normalize(),
            hourly_rate.normalize(),
            policy.holiday_work_multiplier.normalize(),
            holiday_pay.normalize(),
            hours.total_night_work_hours.normalize(),
            hourly_rate.normalize(),
            policy.night_work_multiplier.normalize(),
            night_work_pay.normalize()
        ),
    };

    Ok(PayComponentsResult {
        base_salary_pay,
        overtime_pay,
        holiday_pay,
        night_work_pay,
        insurable_income,
        audit_step,
    })
}
