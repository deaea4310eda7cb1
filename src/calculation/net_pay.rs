//! Net pay with a zero floor.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning};

/// Warning code raised when deductions exceed gross pay.
pub const NET_PAY_FLOORED_WARNING: &str = "NET_PAY_FLOORED";

/// The result of the net pay calculation.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Net pay, never negative.
    pub net_pay: Decimal,
    /// True when the raw net pay was negative and clamped to zero.
    pub floored: bool,
    /// Set when `floored` is true.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `max(0, gross_pay - total_deductions)`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_net_pay;
/// use rust_decimal::Decimal;
///
/// let result = calculate_net_pay(Decimal::from(100), Decimal::from(150), 1);
/// assert_eq!(result.net_pay, Decimal::ZERO);
/// assert!(result.floored);
/// ```
pub fn calculate_net_pay(
    gross_pay: Decimal,
    total_deductions: Decimal,
    step_number: u32,
) -> NetPayResult {
    let raw = gross_pay - total_deductions;
    let floored = raw < Decimal::ZERO;
    let net_pay = if floored { Decimal::ZERO } else { raw };

    let warning = floored.then(|| {
        AuditWarning::new(
            NET_PAY_FLOORED_WARNING,
            format!(
                "Deductions {} exceed gross pay {}; net pay set to 0",
                total_deductions.normalize(),
                gross_pay.normalize()
            ),
            "high",
        )
    });

    let reasoning = if floored {
        format!(
            "{} - {} = {}, floored to 0",
            gross_pay.normalize(),
            total_deductions.normalize(),
            raw.normalize()
        )
    } else {
        format!(
            "{} - {} = {}",
            gross_pay.normalize(),
            total_deductions.normalize(),
            net_pay.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.normalize().to_string(),
            "net_pay_floored": floored
        }),
        reasoning,
    };

    NetPayResult {
        net_pay,
        floored,
        warning,
        audit_step,
    }
}
