//! Store configuration
//!
//! Selects the backend a [`Store`](crate::Store) opens. Configurations are
//! plain serde types so applications can keep them in RON files:
//!
//! ```ron
//! (location: Persistent(path: "data/library.db"))
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the store keeps its data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreLocation {
    /// Volatile store, dropped with the handler
    InMemory,
    /// Database file on disk
    Persistent { path: PathBuf },
}

/// Configuration for opening a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend location
    #[serde(default = "default_location")]
    pub location: StoreLocation,
}

fn default_location() -> StoreLocation {
    StoreLocation::InMemory
}

impl StoreConfig {
    /// Configuration for an in-memory store
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
        }
    }

    /// Configuration for a store file at `path`
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::Persistent { path: path.into() },
        }
    }

    /// Check whether the store lives only in memory
    pub fn is_in_memory(&self) -> bool {
        matches!(self.location, StoreLocation::InMemory)
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&text)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_memory() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert_eq!(config, StoreConfig::in_memory());
    }

    #[test]
    fn test_parse_persistent() {
        let config =
            StoreConfig::from_ron_str(r#"(location: Persistent(path: "data/library.db"))"#)
                .unwrap();
        assert_eq!(config, StoreConfig::persistent("data/library.db"));
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_parse_empty_uses_default() {
        let config = StoreConfig::from_ron_str("()").unwrap();
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_parse_rejects_unknown_location() {
        let err = StoreConfig::from_ron_str("(location: Remote)").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.ron");
        fs::write(&path, "(location: InMemory)").unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StoreConfig::load("/nonexistent/store.ron").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
