//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{DocumentStore, MemoryStore, PayrollStore};

/// Shared application state.
///
/// Holds the loaded configuration and the document store. Cloning is cheap;
/// both are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: PayrollStore,
}

impl AppState {
    /// Creates a new application state over the given document store.
    pub fn new(config: ConfigLoader, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store: PayrollStore::new(documents),
        }
    }

    /// Creates a new application state backed by an empty [`MemoryStore`].
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the typed payroll store.
    pub fn store(&self) -> &PayrollStore {
        &self.store
    }
}
