//! Lateness deduction.
//!
//! Compares the employee's actual entry time with the contractual entry time
//! and applies a flat penalty once the grace period is exceeded.
//!
//! Time parsing here is fail-soft: a malformed time must not stop payroll
//! for a whole batch, so an unparseable entry or default entry time results
//! in no deduction and an `INVALID_TIME_FORMAT` warning.

use rust_decimal::Decimal;

use super::time_of_day::parse_time_of_day;
use crate::config::PayPolicy;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning};

/// Warning code raised when an entry time cannot be parsed.
pub const INVALID_TIME_WARNING: &str = "INVALID_TIME_FORMAT";

/// The result of the lateness check.
#[derive(Debug, Clone)]
pub struct LatenessResult {
    /// The deduction, either zero or the policy's penalty amount.
    pub deduction: Decimal,
    /// Minutes late (negative when early), if both times parsed.
    pub lateness_minutes: Option<i64>,
    /// Set when the fail-soft path was taken.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Calculates the lateness deduction for an entry time.
///
/// `lateness_minutes = entry_time - default_entry_time`, both as minutes
/// since midnight on the same day. When `lateness_minutes` exceeds
/// `max_allowed_lateness`, the deduction is `lateness_penalty_amount`;
/// otherwise it is zero.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_lateness_deduction;
/// # use estate_payroll::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// # let policy = PayPolicy {
/// #     base_salary_of_month: Decimal::ZERO,
/// #     overtime_multiplier: Decimal::ONE,
/// #     night_work_multiplier: Decimal::ONE,
/// #     holiday_work_multiplier: Decimal::ONE,
/// #     child_allowance: Decimal::ZERO,
/// #     housing_allowance: Decimal::ZERO,
/// #     food_allowance: Decimal::ZERO,
/// #     insurance_deduction_percentage: Decimal::ZERO,
/// #     max_allowed_lateness: 15,
/// #     lateness_penalty_amount: Decimal::from(500_000),
/// #     default_entry_time: "08:00".to_string(),
/// #     default_exit_time: "16:00".to_string(),
/// # };
/// let late = calculate_lateness_deduction("08:20", &policy, 1);
/// assert_eq!(late.deduction, Decimal::from(500_000));
///
/// let garbled = calculate_lateness_deduction("", &policy, 1);
/// assert_eq!(garbled.deduction, Decimal::ZERO);
/// assert!(garbled.warning.is_some());
/// ```
pub fn calculate_lateness_deduction(
    entry_time: &str,
    policy: &PayPolicy,
    step_number: u32,
) -> LatenessResult {
    let input = serde_json::json!({
        "entry_time": entry_time,
        "default_entry_time": policy.default_entry_time,
        "max_allowed_lateness": policy.max_allowed_lateness,
        "lateness_penalty_amount": policy.lateness_penalty_amount.normalize().to_string()
    });

    match lateness_minutes(entry_time, &policy.default_entry_time) {
        Ok(minutes) => {
            let exceeded = minutes > i64::from(policy.max_allowed_lateness);
            let deduction = if exceeded {
                policy.lateness_penalty_amount
            } else {
                Decimal::ZERO
            };

            let reasoning = if exceeded {
                format!(
                    "Entered {} minutes after {}, beyond the {} minute grace period; penalty {} applied",
                    minutes,
                    policy.default_entry_time,
                    policy.max_allowed_lateness,
                    policy.lateness_penalty_amount.normalize()
                )
            } else {
                format!(
                    "Lateness of {} minutes is within the {} minute grace period, no penalty",
                    minutes, policy.max_allowed_lateness
                )
            };

            LatenessResult {
                deduction,
                lateness_minutes: Some(minutes),
                warning: None,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "lateness_deduction".to_string(),
                    rule_name: "Lateness Deduction".to_string(),
                    input,
                    output: serde_json::json!({
                        "lateness_minutes": minutes,
                        "penalty_applied": exceeded,
                        "lateness_deduction": deduction.normalize().to_string()
                    }),
                    reasoning,
                },
            }
        }
        Err(err) => {
            let message = format!("Lateness not assessed: {}", err);
            LatenessResult {
                deduction: Decimal::ZERO,
                lateness_minutes: None,
                warning: Some(AuditWarning::new(INVALID_TIME_WARNING, message.clone(), "medium")),
                audit_step: AuditStep {
                    step_number,
                    rule_id: "lateness_deduction".to_string(),
                    rule_name: "Lateness Deduction".to_string(),
                    input,
                    output: serde_json::json!({
                        "lateness_minutes": null,
                        "penalty_applied": false,
                        "lateness_deduction": "0"
                    }),
                    reasoning: message,
                },
            }
        }
    }
}

fn lateness_minutes(entry_time: &str, default_entry_time: &str) -> EngineResult<i64> {
    Ok(parse_time_of_day(entry_time)? - parse_time_of_day(default_entry_time)?)
}
