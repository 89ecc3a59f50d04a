//! Reply generation parameters.
//!
//! [`ReplyConfig`] groups the values injected into the reply generator at
//! construction: the persona, the model call parameters and the polling
//! ceiling. Defaults reproduce the production behavior exactly.

use counsel_domain::Persona;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Fixed user-facing text returned when the provider path fails.
pub const DEGRADED_REPLY: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again later.";

/// Model call parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 512,
        }
    }
}

/// Completion polling policy.
///
/// The interval is slept before every fetch, so the ceiling is
/// `max_attempts * interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(1),
        }
    }
}

/// Everything the reply generator needs besides its ports.
#[derive(Debug, Clone, Default)]
pub struct ReplyConfig {
    pub persona: Persona,
    pub generation: GenerationParams,
    pub poll: PollPolicy,
}

impl ReplyConfig {
    // ==================== Builder Methods ====================

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.generation.model = model.into();
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}
