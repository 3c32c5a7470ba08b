//! Memory trait — key-value state consumed during rendering.
//!
//! Sections read conversation history, the current user input, and
//! template variables from memory through dotted `scope.property` paths.
//! A bare property name defaults to the transient `temp` scope. The path
//! grammar is fixed here so that every backend parses addresses the same
//! way; implementations live in `promptmason-memory`.

use crate::error::MemoryError;
use serde_json::Value;

/// Default scope for paths that omit one.
pub const TEMP_SCOPE: &str = "temp";

/// A parsed memory address: `scope.property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPath {
    pub scope: String,
    pub property: String,
}

impl MemoryPath {
    /// Parse a dotted path.
    ///
    /// `"conversation.history"` → scope `conversation`, property `history`.
    /// `"input"` → scope `temp`, property `input`.
    /// Paths with more than two segments or empty segments are invalid.
    pub fn parse(path: &str) -> Result<Self, MemoryError> {
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or("");
        let second = parts.next();

        if parts.next().is_some() {
            return Err(MemoryError::InvalidPath(path.to_string()));
        }

        let (scope, property) = match second {
            Some(prop) => (first, prop),
            None => (TEMP_SCOPE, first),
        };

        if scope.is_empty() || property.is_empty() {
            return Err(MemoryError::InvalidPath(path.to_string()));
        }

        Ok(Self {
            scope: scope.to_string(),
            property: property.to_string(),
        })
    }
}

impl std::fmt::Display for MemoryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.scope, self.property)
    }
}

/// The key-value memory accessor the engine renders against.
///
/// All methods take `&self`; implementations are expected to guard their
/// own interior state so a single store can back concurrent renders.
pub trait Memory: Send + Sync {
    /// Get the value at `path`, or `None` if unset.
    fn get_value(&self, path: &str) -> Result<Option<Value>, MemoryError>;

    /// Set the value at `path`, creating the scope if needed.
    fn set_value(&self, path: &str, value: Value) -> Result<(), MemoryError>;

    /// Whether a value exists at `path`.
    fn has_value(&self, path: &str) -> Result<bool, MemoryError>;

    /// Delete the value at `path`. Deleting a missing value is a no-op.
    fn delete_value(&self, path: &str) -> Result<(), MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_path_parses() {
        let path = MemoryPath::parse("conversation.history").unwrap();
        assert_eq!(path.scope, "conversation");
        assert_eq!(path.property, "history");
    }

    #[test]
    fn bare_property_defaults_to_temp() {
        let path = MemoryPath::parse("input").unwrap();
        assert_eq!(path.scope, TEMP_SCOPE);
        assert_eq!(path.property, "input");
    }

    #[test]
    fn three_segments_rejected() {
        let err = MemoryPath::parse("a.b.c").unwrap_err();
        assert!(matches!(err, MemoryError::InvalidPath(_)));
    }

    #[test]
    fn empty_segments_rejected() {
        assert!(MemoryPath::parse("").is_err());
        assert!(MemoryPath::parse(".history").is_err());
        assert!(MemoryPath::parse("conversation.").is_err());
    }

    #[test]
    fn display_roundtrip() {
        let path = MemoryPath::parse("user.name").unwrap();
        assert_eq!(path.to_string(), "user.name");
    }
}
