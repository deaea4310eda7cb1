//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod payroll;
mod work_log;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::Employee;
pub use payroll::{PayrollInput, PayrollRecord, PayrollResult};
pub use work_log::{DailyEntry, MonthlyHourTotals, WorkLog, parse_period};
