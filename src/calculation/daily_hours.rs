//! Daily hours calculation.
//!
//! Converts a day's entry and exit times into hours worked, wrapping
//! overnight shifts across midnight.

use rust_decimal::Decimal;

use super::time_of_day::{MINUTES_PER_DAY, parse_time_of_day};
use crate::error::EngineResult;

/// Calculates hours worked between an entry and an exit time.
///
/// The result is `(exit - entry) mod 24h`, in hours, rounded to two decimal
/// places. A missing or blank entry or exit yields zero hours. Equal entry
/// and exit times also yield zero.
///
/// # Errors
///
/// Returns `InvalidTime` if a present, non-blank time is not `HH:MM`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::calculate_daily_hours;
/// use rust_decimal::Decimal;
///
/// // Day shift
/// assert_eq!(calculate_daily_hours(Some("08:00"), Some("16:00")).unwrap(), Decimal::new(8, 0));
///
/// // Overnight shift wraps by 24 hours
/// assert_eq!(calculate_daily_hours(Some("22:00"), Some("06:00")).unwrap(), Decimal::new(8, 0));
///
/// // Missing exit
/// assert_eq!(calculate_daily_hours(Some("08:00"), None).unwrap(), Decimal::ZERO);
/// ```
pub fn calculate_daily_hours(entry_time: Option<&str>, exit_time: Option<&str>) -> EngineResult<Decimal> {
    let (entry, exit) = match (non_blank(entry_time), non_blank(exit_time)) {
        (Some(entry), Some(exit)) => (entry, exit),
        _ => return Ok(Decimal::ZERO),
    };

    let entry_minutes = parse_time_of_day(entry)?;
    let exit_minutes = parse_time_of_day(exit)?;
    let worked_minutes = (exit_minutes - entry_minutes).rem_euclid(MINUTES_PER_DAY);

    Ok((Decimal::from(worked_minutes) / Decimal::from(60)).round_dp(2))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_hour_shift() {
        assert_eq!(
            calculate_daily_hours(Some("08:00"), Some("16:30")).unwrap(),
            dec("8.5")
        );
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 20 minutes = 0.3333... hours
        assert_eq!(
            calculate_daily_hours(Some("09:00"), Some("09:20")).unwrap(),
            dec("0.33")
        );
        // 50 minutes = 0.8333... hours
        assert_eq!(
            calculate_daily_hours(Some("09:00"), Some("09:50")).unwrap(),
            dec("0.83")
        );
    }

    #[test]
    fn test_overnight_shift_with_minutes() {
        assert_eq!(
            calculate_daily_hours(Some("21:45"), Some("06:15")).unwrap(),
            dec("8.5")
        );
    }

    #[test]
    fn test_equal_times_are_zero() {
        assert_eq!(
            calculate_daily_hours(Some("08:00"), Some("08:00")).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_missing_entry_is_zero() {
        assert_eq!(calculate_daily_hours(None, Some("16:00")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_blank_entry_is_zero() {
        assert_eq!(
            calculate_daily_hours(Some("  "), Some("16:00")).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_malformed_exit_is_error() {
        let result = calculate_daily_hours(Some("08:00"), Some("4pm"));
        assert!(matches!(result, Err(EngineError::InvalidTime { .. })));
    }
}
