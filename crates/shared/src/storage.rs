//! Synchronous key-value storage used to persist local state.
//!
//! Values are opaque strings (the favorites index stores JSON arrays).
//! `Database` is the durable implementation; `MemoryStore` backs tests and
//! throwaway sessions.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// A synchronous string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still structurally valid
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
