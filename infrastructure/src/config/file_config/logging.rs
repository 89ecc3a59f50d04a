//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily rolling diagnostic logs (stderr only when unset)
    pub directory: Option<PathBuf>,
    /// JSONL file receiving conversation events (disabled when unset)
    pub conversation_log: Option<PathBuf>,
}
