//! Hourly rate derivation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// A monthly salary expressed per standard working hour.
///
/// Pay amounts are computed as `hours * multiplier * salary / standard_hours`
/// rather than through the rounded per-hour value, so that whole-month
/// amounts come out exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRate {
    monthly_salary: Decimal,
    standard_monthly_hours: Decimal,
    per_hour: Decimal,
}

impl HourlyRate {
    /// Creates a rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `standard_monthly_hours` is not positive
    /// or the per-hour amount does not fit in a `Decimal`.
    pub fn new(monthly_salary: Decimal, standard_monthly_hours: Decimal) -> EngineResult<Self> {
        if standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "standard_monthly_hours".to_string(),
                message: format!("must be greater than zero, got {}", standard_monthly_hours),
            });
        }
        let per_hour = monthly_salary
            .checked_div(standard_monthly_hours)
            .ok_or_else(|| EngineError::amount_too_large("base_salary_of_month"))?;

        Ok(Self {
            monthly_salary,
            standard_monthly_hours,
            per_hour,
        })
    }

    /// The per-hour amount.
    pub fn value(&self) -> Decimal {
        self.per_hour
    }

    /// Pay for `hours` at `multiplier` times the hourly rate, or `None` when
    /// the intermediate product does not fit in a `Decimal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_payroll::calculation::HourlyRate;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = HourlyRate::new(Decimal::from(71_661_840), Decimal::from(220)).unwrap();
    /// assert_eq!(
    ///     rate.pay_for(Decimal::from(220), Decimal::ONE),
    ///     Some(Decimal::from(71_661_840))
    /// );
    /// assert_eq!(rate.pay_for(Decimal::MAX, Decimal::TWO), None);
    /// ```
    pub fn pay_for(&self, hours: Decimal, multiplier: Decimal) -> Option<Decimal> {
        hours
            .checked_mul(multiplier)?
            .checked_mul(self.monthly_salary)?
            .checked_div(self.standard_monthly_hours)
    }
}

/// The result of deriving the hourly rate, including the audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The hourly rate.
    pub rate: HourlyRate,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the hourly rate from the monthly base salary.
///
/// `rate = base_salary_of_month / standard_monthly_hours`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_hourly_rate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_hourly_rate(Decimal::from(2_200_000), Decimal::from(220), 1).unwrap();
/// assert_eq!(result.rate.value(), Decimal::from(10_000));
/// ```
pub fn calculate_hourly_rate(
    base_salary_of_month: Decimal,
    standard_monthly_hours: Decimal,
    step_number: u32,
) -> EngineResult<HourlyRateResult> {
    let rate = HourlyRate::new(base_salary_of_month, standard_monthly_hours)?;
    let value = rate.value();

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Hourly Rate".to_string(),
        input: serde_json::json!({
            "base_salary_of_month": base_salary_of_month.normalize().to_string(),
            "standard_monthly_hours": standard_monthly_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": value.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} hours = {} per hour",
            base_salary_of_month.normalize(),
            standard_monthly_hours.normalize(),
            value.round_dp(4).normalize()
        ),
    };

    Ok(HourlyRateResult { rate, audit_step })
}
