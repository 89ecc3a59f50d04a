//! Database configuration from TOML (`[database]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Path value that selects the in-memory store.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Raw database configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// SQLite file path, or `:memory:` for a non-persistent store
    pub path: String,
}

impl Default for FileDatabaseConfig {
    fn default() -> Self {
        Self {
            path: "career-counsel.db".to_string(),
        }
    }
}

impl FileDatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == MEMORY_DATABASE
    }

    /// File path of the SQLite database, `None` for the in-memory store.
    pub fn file_path(&self) -> Option<PathBuf> {
        (!self.is_in_memory()).then(|| PathBuf::from(&self.path))
    }
}
