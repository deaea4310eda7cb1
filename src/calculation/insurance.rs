//! Social insurance deduction.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of the insurance calculation.
#[derive(Debug, Clone)]
pub struct InsuranceResult {
    /// The insurance deduction.
    pub deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the insurance deduction.
///
/// `deduction = insurable_income * percentage / 100`, where insurable income
/// is the hour-based pay only. Allowances are never insured.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_insurance;
/// use rust_decimal::Decimal;
///
/// let result = calculate_insurance(Decimal::from(71_661_840), Decimal::from(7), 1).unwrap();
/// assert_eq!(result.deduction, Decimal::new(50_163_288, 1));
/// ```
pub fn calculate_insurance(
    insurable_income: Decimal,
    percentage: Decimal,
    step_number: u32,
) -> EngineResult<InsuranceResult> {
    let deduction = insurable_income
        .checked_mul(percentage)
        .ok_or_else(|| EngineError::amount_too_large("insurance_deduction"))?
        / Decimal::ONE_HUNDRED;

    let audit_step = AuditStep {
        step_number,
        rule_id: "insurance_deduction".to_string(),
        rule_name: "Insurance Deduction".to_string(),
        input: serde_json::json!({
            "insurable_income": insurable_income.normalize().to_string(),
            "insurance_deduction_percentage": percentage.normalize().to_string()
        }),
        output: serde_json::json!({
            "insurance_deduction": deduction.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {}% = {} (allowances excluded)",
            insurable_income.normalize(),
            percentage.normalize(),
            deduction.normalize()
        ),
    };

    Ok(InsuranceResult {
        deduction,
        audit_step,
    })
}
