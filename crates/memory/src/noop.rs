//! No-op memory — remembers nothing.

use promptmason_core::error::MemoryError;
use promptmason_core::memory::{Memory, MemoryPath};
use serde_json::Value;

/// A memory backend that stores nothing and returns nothing.
///
/// Useful when a prompt has no dynamic state: sections that read memory
/// simply render empty. Paths are still validated so configuration
/// mistakes surface the same way they would against a real store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMemory;

impl Memory for NoopMemory {
    fn get_value(&self, path: &str) -> Result<Option<Value>, MemoryError> {
        MemoryPath::parse(path)?;
        Ok(None)
    }

    fn set_value(&self, path: &str, _value: Value) -> Result<(), MemoryError> {
        MemoryPath::parse(path)?;
        Ok(())
    }

    fn has_value(&self, path: &str) -> Result<bool, MemoryError> {
        MemoryPath::parse(path)?;
        Ok(false)
    }

    fn delete_value(&self, path: &str) -> Result<(), MemoryError> {
        MemoryPath::parse(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stores_nothing() {
        let memory = NoopMemory;
        memory.set_value("user.name", json!("Alice")).unwrap();
        assert_eq!(memory.get_value("user.name").unwrap(), None);
        assert!(!memory.has_value("user.name").unwrap());
    }

    #[test]
    fn still_validates_paths() {
        let memory = NoopMemory;
        assert!(memory.get_value("a.b.c").is_err());
    }
}
