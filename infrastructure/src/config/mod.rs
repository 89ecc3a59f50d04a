//! Configuration file loading for career-counsel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNSEL_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./counsel.toml` or `./.counsel.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/career-counsel/config.toml`
//! 5. Default values

mod file_config;
mod issue;
mod loader;

pub use file_config::{
    FileAuthConfig, FileChatConfig, FileConfig, FileDatabaseConfig, FileLoggingConfig,
    FilePersonaConfig, FileProviderConfig, FileServerConfig, MEMORY_DATABASE,
};
pub use issue::{ConfigIssue, ConfigIssueCode, Severity};
pub use loader::ConfigLoader;
