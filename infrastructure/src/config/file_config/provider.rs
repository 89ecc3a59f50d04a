//! Inference provider configuration from TOML (`[provider]` section)

use counsel_application::config::reply_config::DEFAULT_MODEL;
use counsel_application::{GenerationParams, PollPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Replicate predictions API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the predictions API.
    pub base_url: String,
    /// Model version submitted with every prediction.
    pub model: String,
    /// Direct API token (prefer `api_token_env`).
    pub api_token: Option<String>,
    /// Environment variable holding the API token (default: "REPLICATE_API_TOKEN").
    pub api_token_env: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Maximum number of status fetches per prediction.
    pub poll_attempts: u32,
    /// Delay before each status fetch, in milliseconds.
    pub poll_interval_ms: u64,
    /// Timeout of a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        let generation = GenerationParams::default();
        let poll = PollPolicy::default();
        Self {
            base_url: "https://api.replicate.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            api_token_env: "REPLICATE_API_TOKEN".to_string(),
            user_agent: "CareerCounselorAI/1.0".to_string(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            poll_attempts: poll.max_attempts,
            poll_interval_ms: poll.interval.as_millis() as u64,
            request_timeout_secs: 30,
        }
    }
}

impl FileProviderConfig {
    /// The API token: set directly, else read from `api_token_env`.
    ///
    /// Empty values count as absent.
    pub fn resolve_token(&self) -> Option<String> {
        self.api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_token_env)
                    .ok()
                    .filter(|t| !t.trim().is_empty())
            })
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.poll_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
