//! Work log models.
//!
//! This module defines the [`WorkLog`] of one employee for one month, its
//! [`DailyEntry`] rows, and the [`MonthlyHourTotals`] the aggregator folds
//! them into.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_daily_hours;
use crate::error::{EngineError, EngineResult};

/// One day's attendance in a work log.
///
/// `hours_worked` is the wall-clock time between `entry_time` and
/// `exit_time`, wrapping overnight shifts by 24 hours. The other hour
/// categories are recorded by payroll staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Day of the month (1-31).
    pub day: u8,
    /// Entry time (`HH:MM`), if recorded.
    #[serde(default)]
    pub entry_time: Option<String>,
    /// Exit time (`HH:MM`), if recorded.
    #[serde(default)]
    pub exit_time: Option<String>,
    /// Regular hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hours worked on a holiday.
    #[serde(default)]
    pub holiday_hours: Decimal,
    /// Hours worked at night.
    #[serde(default)]
    pub night_work_hours: Decimal,
}

impl DailyEntry {
    /// Builds an entry whose `hours_worked` is derived from entry and exit.
    ///
    /// The remaining hour categories start at zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if either time is present but not `HH:MM`.
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_payroll::models::DailyEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = DailyEntry::from_times(3, Some("22:00"), Some("06:30")).unwrap();
    /// assert_eq!(entry.hours_worked, Decimal::new(850, 2));
    /// ```
    pub fn from_times(day: u8, entry_time: Option<&str>, exit_time: Option<&str>) -> EngineResult<Self> {
        let hours_worked = calculate_daily_hours(entry_time, exit_time)?;
        Ok(Self {
            day,
            entry_time: entry_time.map(str::to_string),
            exit_time: exit_time.map(str::to_string),
            hours_worked,
            overtime_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            night_work_hours: Decimal::ZERO,
        })
    }
}

/// The daily attendance of one employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    /// The employee this log belongs to.
    pub employee_id: String,
    /// The payroll period, formatted `YYYY-MM`.
    pub period: String,
    /// Daily entries in day order.
    #[serde(default)]
    pub entries: Vec<DailyEntry>,
}

impl WorkLog {
    /// Returns the first day of the log's period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `period` is not a `YYYY-MM` month.
    ///
    /// # Examples
    ///
    /// ```
    /// use estate_payroll::models::WorkLog;
    /// use chrono::NaiveDate;
    ///
    /// let log = WorkLog {
    ///     employee_id: "emp_001".to_string(),
    ///     period: "2025-03".to_string(),
    ///     entries: vec![],
    /// };
    /// assert_eq!(log.period_start().unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    /// ```
    pub fn period_start(&self) -> EngineResult<NaiveDate> {
        parse_period(&self.period)
    }
}

/// Parses a `YYYY-MM` payroll period into its first day.
pub fn parse_period(period: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").map_err(|e| {
        EngineError::InvalidInput {
            field: "period".to_string(),
            message: format!("'{}' is not a YYYY-MM month: {}", period, e),
        }
    })
}

/// Monthly hour totals derived from a work log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHourTotals {
    /// Sum of regular hours worked.
    pub total_hours_worked: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Sum of holiday hours.
    pub total_holiday_hours: Decimal,
    /// Sum of night-work hours.
    pub total_night_work_hours: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_times_day_shift() {
        let entry = DailyEntry::from_times(1, Some("08:00"), Some("16:30")).unwrap();
        assert_eq!(entry.hours_worked, dec("8.5"));
        assert_eq!(entry.overtime_hours, Decimal::ZERO);
        assert_eq!(entry.entry_time.as_deref(), Some("08:00"));
    }

    #[test]
    fn test_from_times_missing_exit_is_zero_hours() {
        let entry = DailyEntry::from_times(2, Some("08:00"), None).unwrap();
        assert_eq!(entry.hours_worked, Decimal::ZERO);
        assert!(entry.exit_time.is_none());
    }

    #[test]
    fn test_from_times_malformed_is_error() {
        let result = DailyEntry::from_times(2, Some("8am"), Some("16:00"));
        assert!(matches!(result, Err(EngineError::InvalidTime { .. })));
    }

    #[test]
    fn test_daily_entry_deserialization_defaults() {
        let json = r#"{ "day": 5, "hours_worked": "7.25" }"#;
        let entry: DailyEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.day, 5);
        assert_eq!(entry.hours_worked, dec("7.25"));
        assert_eq!(entry.night_work_hours, Decimal::ZERO);
        assert!(entry.entry_time.is_none());
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let log = WorkLog {
            employee_id: "emp_001".to_string(),
            period: "2025-13".to_string(),
            entries: vec![],
        };

        match log.period_start() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "period"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
