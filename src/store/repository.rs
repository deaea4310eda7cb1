//! Typed access to the payroll collections.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::{
    DocumentStore, EMPLOYEES, PAY_POLICY_ID, PAYROLLS, SETTINGS, WORK_LOGS, work_log_id,
};
use crate::config::PayPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord, WorkLog};

/// Reads and writes payroll documents through a [`DocumentStore`].
///
/// Documents are (de)serialized with serde; a stored document that does not
/// match its model surfaces as `StorageError`.
#[derive(Clone)]
pub struct PayrollStore {
    documents: Arc<dyn DocumentStore>,
}

impl PayrollStore {
    /// Wraps a document store.
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Loads an employee.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` if no document exists under `id`.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.fetch(EMPLOYEES, id)?
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Stores an employee under its own id.
    pub fn put_employee(&self, employee: &Employee) -> EngineResult<()> {
        self.store(EMPLOYEES, &employee.id, employee)
    }

    /// Loads the work log of an employee for a period.
    ///
    /// # Errors
    ///
    /// Returns `WorkLogNotFound` if the employee has no log for `period`.
    pub fn work_log(&self, employee_id: &str, period: &str) -> EngineResult<WorkLog> {
        self.fetch(WORK_LOGS, &work_log_id(employee_id, period))?
            .ok_or_else(|| EngineError::WorkLogNotFound {
                employee_id: employee_id.to_string(),
                period: period.to_string(),
            })
    }

    /// Stores a work log under `{employee_id}_{period}`.
    pub fn put_work_log(&self, log: &WorkLog) -> EngineResult<()> {
        self.store(WORK_LOGS, &work_log_id(&log.employee_id, &log.period), log)
    }

    /// Loads the stored pay policy, if one has been saved.
    pub fn pay_policy(&self) -> EngineResult<Option<PayPolicy>> {
        self.fetch(SETTINGS, PAY_POLICY_ID)
    }

    /// Replaces the stored pay policy.
    pub fn put_pay_policy(&self, policy: &PayPolicy) -> EngineResult<()> {
        self.store(SETTINGS, PAY_POLICY_ID, policy)
    }

    /// Persists a payroll record under its record id.
    pub fn save_payroll(&self, record: &PayrollRecord) -> EngineResult<()> {
        self.store(PAYROLLS, &record.record_id.to_string(), record)
    }

    /// Loads a payroll record.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record exists under `record_id`.
    pub fn payroll(&self, record_id: Uuid) -> EngineResult<PayrollRecord> {
        let id = record_id.to_string();
        self.fetch(PAYROLLS, &id)?
            .ok_or(EngineError::RecordNotFound { id })
    }

    /// Returns every stored payroll record of an employee, oldest first.
    pub fn payrolls_for(&self, employee_id: &str) -> EngineResult<Vec<PayrollRecord>> {
        let mut records = Vec::new();
        for (id, document) in self.documents.list(PAYROLLS)? {
            let record: PayrollRecord = decode(PAYROLLS, &id, document)?;
            if record.employee_id == employee_id {
                records.push(record);
            }
        }
        records.sort_by_key(|r| r.calculated_at);
        Ok(records)
    }

    fn fetch<T: DeserializeOwned>(&self, collection: &str, id: &str) -> EngineResult<Option<T>> {
        self.documents
            .get(collection, id)?
            .map(|document| decode(collection, id, document))
            .transpose()
    }

    fn store<T: Serialize>(&self, collection: &str, id: &str, value: &T) -> EngineResult<()> {
        let document = serde_json::to_value(value).map_err(|e| EngineError::StorageError {
            message: format!("failed to encode {}/{}: {}", collection, id, e),
        })?;
        debug!(collection, id, "Storing document");
        self.documents.set(collection, id, document)
    }
}

fn decode<T: DeserializeOwned>(collection: &str, id: &str, document: serde_json::Value) -> EngineResult<T> {
    serde_json::from_value(document).map_err(|e| EngineError::StorageError {
        message: format!("malformed document {}/{}: {}", collection, id, e),
    })
}
