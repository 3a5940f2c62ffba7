//! In-memory key/value store.

use crate::db::error::DbError;
use crate::db::repository::KeyValueStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, DbError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DbError::InvalidData("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, DbError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete_raw(&self, key: &str) -> Result<(), DbError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
