//! Flat monthly allowances.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The allowance components of a payroll.
#[derive(Debug, Clone)]
pub struct AllowancesResult {
    /// `children_count * child_allowance`.
    pub child_allowance: Decimal,
    /// Housing allowance from the policy.
    pub housing_allowance: Decimal,
    /// Food allowance from the policy.
    pub food_allowance: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the child, housing, and food allowances.
///
/// The child allowance is paid per child; housing and food pass through
/// from the policy unchanged.
pub fn calculate_allowances(
    children_count: u32,
    policy: &PayPolicy,
    step_number: u32,
) -> EngineResult<AllowancesResult> {
    let child_allowance = Decimal::from(children_count)
        .checked_mul(policy.child_allowance)
        .ok_or_else(|| EngineError::amount_too_large("child_allowance"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Monthly Allowances".to_string(),
        input: serde_json::json!({
            "children_count": children_count,
            "child_allowance_per_child": policy.child_allowance.normalize().to_string(),
            "housing_allowance": policy.housing_allowance.normalize().to_string(),
            "food_allowance": policy.food_allowance.normalize().to_string()
        }),
        output: serde_json::json!({
            "child_allowance": child_allowance.normalize().to_string(),
            "housing_allowance": policy.housing_allowance.normalize().to_string(),
            "food_allowance": policy.food_allowance.normalize().to_string()
        }),
        reasoning: format!(
            "{} children x {} = {}; housing {} and food {} paid as configured",
            children_count,
            policy.child_allowance.normalize(),
            child_allowance.normalize(),
            policy.housing_allowance.normalize(),
            policy.food_allowance.normalize()
        ),
    };

    Ok(AllowancesResult {
        child_allowance,
        housing_allowance: policy.housing_allowance,
        food_allowance: policy.food_allowance,
        audit_step,
    })
}
