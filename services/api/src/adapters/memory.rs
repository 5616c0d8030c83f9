//! services/api/src/adapters/memory.rs
//!
//! In-memory `KeyValueStorage`, used for ephemeral runs and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use moodmorph_core::ports::{KeyValueStorage, PortError, PortResult};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, e.g. a pre-existing persisted blob.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut values) = storage.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| PortError::Unexpected("memory storage lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| PortError::Unexpected("memory storage lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
