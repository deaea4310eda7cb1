//! `HH:MM` time-of-day parsing.
//!
//! Work logs and pay policies carry times as `HH:MM` strings. Parsing
//! returns a `Result` so that callers choose between failing (daily hours)
//! and degrading (lateness) explicitly.

use chrono::{NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

/// Minutes in a day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses an `HH:MM` string into minutes since midnight.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `InvalidTime` if the value is not a valid 24-hour `HH:MM` time.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("08:30").unwrap(), 510);
/// assert_eq!(parse_time_of_day("23:59").unwrap(), 1439);
/// assert!(parse_time_of_day("").is_err());
/// assert!(parse_time_of_day("25:00").is_err());
/// ```
pub fn parse_time_of_day(value: &str) -> EngineResult<i64> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| {
        EngineError::InvalidTime {
            value: value.to_string(),
            message: e.to_string(),
        }
    })?;

    Ok(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_is_zero() {
        assert_eq!(parse_time_of_day("00:00").unwrap(), 0);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_time_of_day(" 16:00 ").unwrap(), 960);
    }

    #[test]
    fn test_invalid_minutes_rejected() {
        assert!(parse_time_of_day("10:75").is_err());
    }

    #[test]
    fn test_garbage_reports_raw_value() {
        match parse_time_of_day("late") {
            Err(EngineError::InvalidTime { value, .. }) => assert_eq!(value, "late"),
            other => panic!("Expected InvalidTime, got {:?}", other),
        }
    }

    #[test]
    fn test_seconds_are_not_accepted() {
        assert!(parse_time_of_day("08:00:00").is_err());
    }
}
