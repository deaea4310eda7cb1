//! Employee model.
//!
//! This module defines the slice of an estate personnel record that the
//! payroll engine consumes.

use serde::{Deserialize, Serialize};

/// Represents an employee subject to payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, copied onto payroll records.
    pub name: String,
    /// Number of dependent children for the child allowance.
    #[serde(default)]
    pub children_count: u32,
    /// Actual entry time (`HH:MM`) for the payroll period.
    pub entry_time: String,
}
