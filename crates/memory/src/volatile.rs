//! In-process memory — useful for testing and ephemeral sessions.

use promptmason_core::error::MemoryError;
use promptmason_core::memory::{Memory, MemoryPath};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::trace;

/// A thread-safe, in-process key-value store keyed by `scope.property`.
///
/// Reads and writes go through an interior `RwLock`, so one store can
/// back concurrent render pipelines without external locking.
#[derive(Debug, Default)]
pub struct VolatileMemory {
    scopes: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl VolatileMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, HashMap<String, Value>>>, MemoryError>
    {
        self.scopes
            .read()
            .map_err(|_| MemoryError::Storage("memory lock poisoned".into()))
    }

    fn write_guard(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, HashMap<String, Value>>>, MemoryError>
    {
        self.scopes
            .write()
            .map_err(|_| MemoryError::Storage("memory lock poisoned".into()))
    }
}

impl Memory for VolatileMemory {
    fn get_value(&self, path: &str) -> Result<Option<Value>, MemoryError> {
        let path = MemoryPath::parse(path)?;
        let scopes = self.read_guard()?;
        Ok(scopes
            .get(&path.scope)
            .and_then(|scope| scope.get(&path.property))
            .cloned())
    }

    fn set_value(&self, path: &str, value: Value) -> Result<(), MemoryError> {
        let path = MemoryPath::parse(path)?;
        trace!(%path, "memory set");
        let mut scopes = self.write_guard()?;
        scopes
            .entry(path.scope)
            .or_default()
            .insert(path.property, value);
        Ok(())
    }

    fn has_value(&self, path: &str) -> Result<bool, MemoryError> {
        let path = MemoryPath::parse(path)?;
        let scopes = self.read_guard()?;
        Ok(scopes
            .get(&path.scope)
            .is_some_and(|scope| scope.contains_key(&path.property)))
    }

    fn delete_value(&self, path: &str) -> Result<(), MemoryError> {
        let path = MemoryPath::parse(path)?;
        let mut scopes = self.write_guard()?;
        if let Some(scope) = scopes.get_mut(&path.scope) {
            scope.remove(&path.property);
        }
        Ok(())
    }
}
