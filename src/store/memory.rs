//! In-memory document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::DocumentStore;
use crate::error::{EngineError, EngineResult};

type Collection = BTreeMap<String, serde_json::Value>;

/// A [`DocumentStore`] backed by a map of collections behind a `RwLock`.
///
/// # Examples
///
/// ```
/// use estate_payroll::store::{DocumentStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("employees", "emp_001", serde_json::json!({"name": "Sara"})).unwrap();
/// assert!(store.get("employees", "emp_001").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> EngineError {
    EngineError::StorageError {
        message: "document store lock poisoned".to_string(),
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> EngineResult<Option<serde_json::Value>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn set(&self, collection: &str, id: &str, document: serde_json::Value) -> EngineResult<()> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> EngineResult<bool> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }

    fn list(&self, collection: &str) -> EngineResult<Vec<(String, serde_json::Value)>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
