//! Monthly work-hour aggregation.
//!
//! This module folds a [`WorkLog`]'s daily entries into the four monthly
//! totals consumed by the payroll engine.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DailyEntry, MonthlyHourTotals, WorkLog};

/// The result of aggregating a work log.
#[derive(Debug, Clone)]
pub struct WorkHoursAggregation {
    /// The summed hour totals.
    pub totals: MonthlyHourTotals,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Sums a work log's daily hours into monthly totals.
///
/// Each total is the arithmetic sum of the matching per-day field across all
/// entries. An empty log yields all-zero totals.
///
/// # Errors
///
/// Returns `InvalidWorkLog` if an entry has a day outside 1..=31 or any
/// negative hour value, and `InvalidInput` if a total does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use estate_payroll::calculation::aggregate_work_log;
/// use estate_payroll::models::{DailyEntry, WorkLog};
/// use rust_decimal::Decimal;
///
/// let log = WorkLog {
///     employee_id: "emp_001".to_string(),
///     period: "2025-03".to_string(),
///     entries: vec![
///         DailyEntry::from_times(1, Some("08:00"), Some("16:00")).unwrap(),
///         DailyEntry::from_times(2, Some("08:00"), Some("12:30")).unwrap(),
///     ],
/// };
///
/// let result = aggregate_work_log(&log, 1).unwrap();
/// assert_eq!(result.totals.total_hours_worked, Decimal::new(125, 1));
/// ```
pub fn aggregate_work_log(log: &WorkLog, step_number: u32) -> EngineResult<WorkHoursAggregation> {
    let mut totals = MonthlyHourTotals::default();

    for entry in &log.entries {
        validate_entry(entry)?;
        add_hours(&mut totals.total_hours_worked, entry.hours_worked, "total_hours_worked")?;
        add_hours(&mut totals.total_overtime_hours, entry.overtime_hours, "total_overtime_hours")?;
        add_hours(&mut totals.total_holiday_hours, entry.holiday_hours, "total_holiday_hours")?;
        add_hours(
            &mut totals.total_night_work_hours,
            entry.night_work_hours,
            "total_night_work_hours",
        )?;
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "work_hours_aggregation".to_string(),
        rule_name: "Monthly Work Hours".to_string(),
        input: serde_json::json!({
            "employee_id": log.employee_id,
            "period": log.period,
            "entries": log.entries.len()
        }),
        output: serde_json::json!({
            "total_hours_worked": totals.total_hours_worked.normalize().to_string(),
            "total_overtime_hours": totals.total_overtime_hours.normalize().to_string(),
            "total_holiday_hours": totals.total_holiday_hours.normalize().to_string(),
            "total_night_work_hours": totals.total_night_work_hours.normalize().to_string()
        }),
        reasoning: format!(
            "Summed {} daily entries: {} regular, {} overtime, {} holiday, {} night hours",
            log.entries.len(),
            totals.total_hours_worked.normalize(),
            totals.total_overtime_hours.normalize(),
            totals.total_holiday_hours.normalize(),
            totals.total_night_work_hours.normalize()
        ),
    };

    Ok(WorkHoursAggregation { totals, audit_step })
}

fn add_hours(total: &mut Decimal, hours: Decimal, field: &str) -> EngineResult<()> {
    *total = total
        .checked_add(hours)
        .ok_or_else(|| EngineError::amount_too_large(field))?;
    Ok(())
}

fn validate_entry(entry: &DailyEntry) -> EngineResult<()> {
    if !(1..=31).contains(&entry.day) {
        return Err(EngineError::InvalidWorkLog {
            day: entry.day,
            message: "day must be between 1 and 31".to_string(),
        });
    }

    let fields = [
        ("hours_worked", entry.hours_worked),
        ("overtime_hours", entry.overtime_hours),
        ("holiday_hours", entry.holiday_hours),
        ("night_work_hours", entry.night_work_hours),
    ];
    for (name, value) in fields {
        if value < Decimal::ZERO {
            return Err(EngineError::InvalidWorkLog {
                day: entry.day,
                message: format!("{} is negative ({})", name, value),
            });
        }
    }

    Ok(())
}
