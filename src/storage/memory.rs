use std::collections::HashMap;

use super::{BlobStore, StoreError};

/// In-process blob store. Nothing survives the process; used by tests and as
/// a scratch backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing value, e.g. data written by an earlier session.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.values.insert(key.into(), value.into());
        store
    }

    /// Raw access to what was last written under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
