//! Progressive income tax.
//!
//! Tax is assessed on annualized gross pay against a [`TaxTable`] and spread
//! back over twelve months. Brackets are checked top-down and the first
//! threshold exceeded wins:
//!
//! ```text
//! annual_tax = base + (annual_gross - threshold) * rate
//! ```
//!
//! Because the table guarantees every `base` is the cumulative tax at its
//! threshold, the result equals summing the marginal tax of each band.

use rust_decimal::Decimal;

use crate::config::TaxTable;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of the tax calculation.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// The monthly tax deduction.
    pub monthly_tax: Decimal,
    /// `monthly_gross * 12`.
    pub annual_gross: Decimal,
    /// Tax owed on `annual_gross`.
    pub annual_tax: Decimal,
    /// Index of the bracket applied, or `None` when exempt.
    pub bracket_index: Option<usize>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly income tax on a monthly gross pay.
///
/// Annual income at or below the table's first threshold is exempt. Income
/// above the highest threshold keeps the highest rate.
///
/// # Errors
///
/// Returns `InvalidInput` when the annualized gross or the annual tax does
/// not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_tax;
/// use estate_payroll::config::TaxTable;
/// use rust_decimal::Decimal;
///
/// let table = TaxTable::default();
///
/// // 150M a month is 1.8B a year: (1.8B - 1.44B) x 10% = 36M, 3M a month.
/// let result = calculate_tax(Decimal::from(150_000_000), &table, 1).unwrap();
/// assert_eq!(result.monthly_tax, Decimal::from(3_000_000));
///
/// let exempt = calculate_tax(Decimal::from(120_000_000), &table, 1).unwrap();
/// assert_eq!(exempt.monthly_tax, Decimal::ZERO);
/// ```
pub fn calculate_tax(
    monthly_gross: Decimal,
    table: &TaxTable,
    step_number: u32,
) -> EngineResult<TaxResult> {
    let annual_gross = monthly_gross
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| EngineError::amount_too_large("gross_pay"))?;
    let brackets = table.brackets();

    let bracket_index = brackets.iter().rposition(|b| annual_gross > b.threshold);

    let (annual_tax, reasoning) = match bracket_index {
        Some(index) => {
            let bracket = &brackets[index];
            let annual_tax = (annual_gross - bracket.threshold)
                .checked_mul(bracket.rate)
                .and_then(|marginal| marginal.checked_add(bracket.base))
                .ok_or_else(|| EngineError::amount_too_large("gross_pay"))?;
            let reasoning = format!(
                "Annual gross {} exceeds bracket {} threshold {}: {} + ({} - {}) x {} = {}",
                annual_gross.normalize(),
                index,
                bracket.threshold.normalize(),
                bracket.base.normalize(),
                annual_gross.normalize(),
                bracket.threshold.normalize(),
                bracket.rate.normalize(),
                annual_tax.normalize()
            );
            (annual_tax, reasoning)
        }
        None => (
            Decimal::ZERO,
            format!(
                "Annual gross {} is at or below the exemption threshold {}",
                annual_gross.normalize(),
                table.exemption_threshold().normalize()
            ),
        ),
    };

    let monthly_tax = annual_tax / MONTHS_PER_YEAR;

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.normalize().to_string(),
            "annual_gross": annual_gross.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket_index": bracket_index,
            "annual_tax": annual_tax.normalize().to_string(),
            "tax_deduction": monthly_tax.normalize().to_string()
        }),
        reasoning,
    };

    Ok(TaxResult {
        monthly_tax,
        annual_gross,
        annual_tax,
        bracket_index,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exempt_at_threshold() {
        let result = calculate_tax(dec("120000000"), &TaxTable::default(), 1).unwrap();

        assert_eq!(result.annual_gross, dec("1440000000"));
        assert_eq!(result.monthly_tax, Decimal::ZERO);
        assert_eq!(result.bracket_index, None);
    }

    #[test]
    fn test_first_bracket() {
        let result = calculate_tax(dec("150000000"), &TaxTable::default(), 1).unwrap();

        assert_eq!(result.bracket_index, Some(0));
        assert_eq!(result.annual_tax, dec("36000000"));
        assert_eq!(result.monthly_tax, dec("3000000"));
    }

    #[test]
    fn test_second_bracket() {
        // 2.4B: 54M + 420M x 15% = 117M.
        let result = calculate_tax(dec("200000000"), &TaxTable::default(), 1).unwrap();

        assert_eq!(result.bracket_index, Some(1));
        assert_eq!(result.annual_tax, dec("117000000"));
        assert_eq!(result.monthly_tax, dec("9750000"));
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        // 6B: 555M + 1.2B x 30% = 915M.
        let result = calculate_tax(dec("500000000"), &TaxTable::default(), 1).unwrap();

        assert_eq!(result.bracket_index, Some(3));
        assert_eq!(result.annual_tax, dec("915000000"));
        assert_eq!(result.monthly_tax, dec("76250000"));
    }

    #[test]
    fn test_continuous_at_each_threshold() {
        let table = TaxTable::default();
        for bracket in table.brackets() {
            // Every default threshold is a whole number of months.
            let monthly_at = bracket.threshold / dec("12");
            let at = calculate_tax(monthly_at, &table, 1).unwrap();
            let above = calculate_tax(monthly_at + Decimal::ONE, &table, 1).unwrap();

            assert_eq!(at.annual_tax, bracket.base);
            assert_eq!(above.annual_tax, bracket.base + dec("12") * bracket.rate);
        }
    }

    #[test]
    fn test_audit_step_names_bracket() {
        let result = calculate_tax(dec("200000000"), &TaxTable::default(), 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "income_tax");
        assert_eq!(result.audit_step.output["bracket_index"], 1);
        assert!(result.audit_step.reasoning.contains("bracket 1"));
    }

    #[test]
    fn test_custom_table() {
        let table = TaxTable::from_bands(&[(dec("1000"), dec("0.5"))]).unwrap();
        let result = calculate_tax(dec("100"), &table, 1).unwrap();

        // 1200 annual, 200 above the threshold at 50%.
        assert_eq!(result.annual_tax, dec("100"));
    }

    #[test]
    fn test_unannualizable_gross_is_rejected() {
        match calculate_tax(Decimal::MAX, &TaxTable::default(), 7) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross_pay"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_no_tax_below_exemption(monthly in 0u64..=120_000_000u64) {
            let result = calculate_tax(Decimal::from(monthly), &TaxTable::default(), 1).unwrap();
            prop_assert_eq!(result.monthly_tax, Decimal::ZERO);
        }

        #[test]
        fn prop_tax_is_monotonic(a in 0u64..1_000_000_000u64, b in 0u64..1_000_000_000u64) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let table = TaxTable::default();
            let low_tax = calculate_tax(Decimal::from(low), &table, 1).unwrap().annual_tax;
            let high_tax = calculate_tax(Decimal::from(high), &table, 1).unwrap().annual_tax;
            prop_assert!(low_tax <= high_tax);
        }

        #[test]
        fn prop_tax_never_exceeds_income(monthly in 0u64..10_000_000_000u64) {
            let result = calculate_tax(Decimal::from(monthly), &TaxTable::default(), 1).unwrap();
            prop_assert!(result.monthly_tax >= Decimal::ZERO);
            prop_assert!(result.monthly_tax <= Decimal::from(monthly));
        }
    }
}
