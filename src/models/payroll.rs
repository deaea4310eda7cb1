//! Payroll input, result, and record models.
//!
//! [`PayrollInput`] is the transient merge of a month's hour totals, the
//! employee, and the pay policy. [`PayrollResult`] is the itemized output of
//! one calculation, and [`PayrollRecord`] is that result stamped with the
//! identifying metadata under which it is stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, Employee, MonthlyHourTotals};
use crate::config::PayPolicy;

/// Everything the payroll engine needs for one employee and one month.
///
/// Serializes to a flat object carrying the policy fields, the hour totals,
/// `children_count`, `entry_time`, and `other_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The pay policy in force for this calculation.
    #[serde(flatten)]
    pub policy: PayPolicy,
    /// The month's aggregated hours.
    #[serde(flatten)]
    pub hours: MonthlyHourTotals,
    /// Number of children for the child allowance.
    pub children_count: u32,
    /// Flat deductions beyond insurance, tax, and lateness.
    pub other_deductions: Decimal,
    /// Actual entry time (`HH:MM`) for the period.
    pub entry_time: String,
}

impl PayrollInput {
    /// Merges hour totals, employee data, and policy into an input.
    pub fn new(
        hours: MonthlyHourTotals,
        employee: &Employee,
        policy: &PayPolicy,
        other_deductions: Decimal,
    ) -> Self {
        Self {
            policy: policy.clone(),
            hours,
            children_count: employee.children_count,
            other_deductions,
            entry_time: employee.entry_time.clone(),
        }
    }
}

/// The itemized outcome of a payroll calculation.
///
/// `gross_pay` is the sum of the seven pay and allowance components, and
/// `net_pay` is `gross_pay` minus the four deductions, floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Pay for regular hours.
    pub base_salary_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Pay for holiday hours.
    pub holiday_pay: Decimal,
    /// Pay for night-work hours.
    pub night_work_pay: Decimal,
    /// Total child allowance (per-child amount times children).
    pub child_allowance: Decimal,
    /// Housing allowance.
    pub housing_allowance: Decimal,
    /// Food allowance.
    pub food_allowance: Decimal,
    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// Social insurance deduction.
    pub insurance_deduction: Decimal,
    /// Monthly income-tax deduction.
    pub tax_deduction: Decimal,
    /// Lateness penalty deduction.
    pub lateness_deduction: Decimal,
    /// Other flat deductions, passed through from the input.
    pub other_deductions: Decimal,
    /// Gross pay minus all deductions, never negative.
    pub net_pay: Decimal,
    /// True when deductions exceeded gross pay and net pay was set to zero.
    pub net_pay_floored: bool,
    /// Rules applied and warnings raised during calculation.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Sum of all pay and allowance components.
    pub fn components_total(&self) -> Decimal {
        self.base_salary_pay
            + self.overtime_pay
            + self.holiday_pay
            + self.night_work_pay
            + self.child_allowance
            + self.housing_allowance
            + self.food_allowance
    }

    /// Sum of all deductions.
    pub fn deductions_total(&self) -> Decimal {
        self.insurance_deduction + self.tax_deduction + self.lateness_deduction + self.other_deductions
    }
}

/// A stored payroll result with identifying metadata.
///
/// Records are immutable: re-running a payroll produces a new record
/// rather than editing an old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,
    /// The employee the payroll was calculated for.
    pub employee_id: String,
    /// The employee's name at calculation time.
    pub employee_name: String,
    /// The payroll period (`YYYY-MM`).
    pub period: String,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculated payroll.
    #[serde(flatten)]
    pub result: PayrollResult,
}

impl PayrollRecord {
    /// Stamps a result with a fresh record id and the current time.
    pub fn new(employee: &Employee, period: impl Into<String>, result: PayrollResult) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            period: period.into(),
            calculated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}
