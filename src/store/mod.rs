//! Document storage.
//!
//! The payroll engine reads employees, work logs, and the pay policy from a
//! keyed document store and writes payroll records back to it. The store is
//! an opaque collaborator: [`DocumentStore`] only promises atomic
//! per-document reads and writes, with no transactions across collections.
//!
//! [`PayrollStore`] layers typed access for each collection on top of any
//! [`DocumentStore`].

mod memory;
mod repository;

pub use memory::MemoryStore;
pub use repository::PayrollStore;

use crate::error::EngineResult;

/// Collection holding [`Employee`](crate::models::Employee) documents.
pub const EMPLOYEES: &str = "employees";
/// Collection holding [`WorkLog`](crate::models::WorkLog) documents, keyed
/// `{employee_id}_{period}`.
pub const WORK_LOGS: &str = "workLogs";
/// Collection holding [`PayrollRecord`](crate::models::PayrollRecord) documents.
pub const PAYROLLS: &str = "payrolls";
/// Collection holding singleton settings documents.
pub const SETTINGS: &str = "settings";
/// Id of the pay policy document in [`SETTINGS`].
pub const PAY_POLICY_ID: &str = "payPolicy";

/// A keyed JSON document store addressed by collection and id.
pub trait DocumentStore: Send + Sync {
    /// Returns the document, or `None` if absent.
    fn get(&self, collection: &str, id: &str) -> EngineResult<Option<serde_json::Value>>;

    /// Creates or replaces a document.
    fn set(&self, collection: &str, id: &str, document: serde_json::Value) -> EngineResult<()>;

    /// Removes a document, returning whether it existed.
    fn delete(&self, collection: &str, id: &str) -> EngineResult<bool>;

    /// Returns every `(id, document)` pair in a collection, ordered by id.
    fn list(&self, collection: &str) -> EngineResult<Vec<(String, serde_json::Value)>>;
}

/// Builds the document id of a work log.
pub fn work_log_id(employee_id: &str, period: &str) -> String {
    format!("{}_{}", employee_id, period)
}
