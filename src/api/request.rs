//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies and their conversion into
//! domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_daily_hours;
use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyEntry, Employee, WorkLog};

/// Request body for the stateless `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee being paid.
    pub employee: Employee,
    /// Pay policy override; the configured default policy is used if absent.
    #[serde(default)]
    pub policy: Option<PayPolicy>,
    /// The month's attendance.
    pub work_log: WorkLogRequest,
    /// Flat deductions beyond insurance, tax, and lateness.
    #[serde(default)]
    pub other_deductions: Decimal,
}

/// A month of daily entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLogRequest {
    /// The payroll period (`YYYY-MM`).
    pub period: String,
    /// Daily entries.
    #[serde(default)]
    pub entries: Vec<DailyEntryRequest>,
}

/// One day of attendance in a request.
///
/// When both entry and exit times are given, `hours_worked` is derived from
/// them and an explicit value must agree. Otherwise the explicit value is
/// taken as is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntryRequest {
    /// Day of the month (1 to 31).
    pub day: u8,
    /// Entry time (`HH:MM`).
    #[serde(default)]
    pub entry_time: Option<String>,
    /// Exit time (`HH:MM`).
    #[serde(default)]
    pub exit_time: Option<String>,
    /// Explicit hours worked.
    #[serde(default)]
    pub hours_worked: Option<Decimal>,
    /// Overtime hours.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Holiday hours.
    #[serde(default)]
    pub holiday_hours: Decimal,
    /// Night-work hours.
    #[serde(default)]
    pub night_work_hours: Decimal,
}

impl DailyEntryRequest {
    /// Converts to a [`DailyEntry`], deriving `hours_worked` from the times.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTime` if both times are given and one is malformed, and
    /// `InvalidWorkLog` if an explicit `hours_worked` disagrees with them.
    pub fn into_entry(self) -> EngineResult<DailyEntry> {
        let both_times = [&self.entry_time, &self.exit_time]
            .iter()
            .all(|time| time.as_deref().is_some_and(|t| !t.trim().is_empty()));
        let derived = calculate_daily_hours(self.entry_time.as_deref(), self.exit_time.as_deref())?;

        let hours_worked = match self.hours_worked {
            Some(hours) if both_times && hours != derived => {
                return Err(EngineError::InvalidWorkLog {
                    day: self.day,
                    message: format!(
                        "hours_worked {} does not match {} hours between entry and exit",
                        hours.normalize(),
                        derived.normalize()
                    ),
                });
            }
            Some(hours) => hours,
            None => derived,
        };
        Ok(DailyEntry {
            day: self.day,
            entry_time: self.entry_time,
            exit_time: self.exit_time,
            hours_worked,
            overtime_hours: self.overtime_hours,
            holiday_hours: self.holiday_hours,
            night_work_hours: self.night_work_hours,
        })
    }
}

impl WorkLogRequest {
    /// Converts to a [`WorkLog`] for the given employee.
    pub fn into_work_log(self, employee_id: impl Into<String>) -> EngineResult<WorkLog> {
        let entries = self
            .entries
            .into_iter()
            .map(DailyEntryRequest::into_entry)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(WorkLog {
            employee_id: employee_id.into(),
            period: self.period,
            entries,
        })
    }
}

/// Request body for `PUT /work-logs/:employee_id/:period`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLogEntriesRequest {
    /// Daily entries.
    #[serde(default)]
    pub entries: Vec<DailyEntryRequest>,
}

/// Request body for `POST /work-hours/daily`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHoursRequest {
    /// Entry time (`HH:MM`).
    #[serde(default)]
    pub entry_time: Option<String>,
    /// Exit time (`HH:MM`).
    #[serde(default)]
    pub exit_time: Option<String>,
}

/// Request body for `POST /employees/:id/payroll/:period`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// Flat deductions beyond insurance, tax, and lateness.
    #[serde(default)]
    pub other_deductions: Decimal,
}
