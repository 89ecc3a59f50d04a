//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! at wiring time.

mod auth;
mod chat;
mod database;
mod logging;
mod persona;
mod provider;
mod server;

pub use auth::FileAuthConfig;
pub use chat::FileChatConfig;
pub use database::{FileDatabaseConfig, MEMORY_DATABASE};
pub use logging::FileLoggingConfig;
pub use persona::FilePersonaConfig;
pub use provider::FileProviderConfig;
pub use server::FileServerConfig;

use super::issue::{ConfigIssue, ConfigIssueCode};
use counsel_application::ReplyConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Conversation store settings
    pub database: FileDatabaseConfig,
    /// Inference provider settings
    pub provider: FileProviderConfig,
    /// Assistant persona
    pub persona: FilePersonaConfig,
    /// Identity header settings
    pub auth: FileAuthConfig,
    /// Diagnostic and conversation log settings
    pub logging: FileLoggingConfig,
    /// Turn processing settings
    pub chat: FileChatConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the server unable to start; warnings are logged.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Listener address
        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "server.bind".to_string(),
                    value: self.server.bind.clone(),
                },
                format!("server.bind: '{}' is not a socket address", self.server.bind),
            ));
        }

        // 2. Required strings
        for (field, value) in [
            ("database.path", &self.database.path),
            ("provider.base_url", &self.provider.base_url),
            ("provider.model", &self.provider.model),
            ("auth.user_header", &self.auth.user_header),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{}: cannot be empty", field),
                ));
            }
        }

        // 3. Generation and polling ranges
        let provider = &self.provider;
        if !(0.0..=2.0).contains(&provider.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "provider.temperature".to_string(),
                    value: provider.temperature.to_string(),
                },
                format!(
                    "provider.temperature: {} is outside 0.0..=2.0",
                    provider.temperature
                ),
            ));
        }
        for (field, value) in [
            ("provider.max_tokens", provider.max_tokens as u64),
            ("provider.poll_attempts", provider.poll_attempts as u64),
            ("provider.request_timeout_secs", provider.request_timeout_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                        value: "0".to_string(),
                    },
                    format!("{}: cannot be 0", field),
                ));
            }
        }

        // 4. Credential (startup continues without it)
        if provider.resolve_token().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingCredential {
                    env_var: provider.api_token_env.clone(),
                },
                format!(
                    "no API token configured (set {} or provider.api_token); chat turns will fail",
                    provider.api_token_env
                ),
            ));
        }

        issues
    }

    /// Reply generator settings derived from `[provider]` and `[persona]`.
    pub fn reply_config(&self) -> ReplyConfig {
        ReplyConfig::default()
            .with_persona(self.persona.to_persona())
            .with_generation(self.provider.generation_params())
            .with_poll_policy(self.provider.poll_policy())
    }
}
