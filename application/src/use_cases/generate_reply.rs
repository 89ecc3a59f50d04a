//! Generate Reply use case.
//!
//! Turns a conversation history into assistant reply text through an
//! asynchronous prediction provider:
//!
//! 1. Bound the history (50 most recent entries, 4000 characters each)
//! 2. Normalize roles and prepend the persona's system prompt
//! 3. Submit; return at once if the submission already carries output
//! 4. Otherwise poll with [`PollState`] until success, failure or timeout
//!
//! Every failure except a missing credential degrades into
//! [`DEGRADED_REPLY`], so a chat turn always completes with some text.

use crate::config::reply_config::{DEGRADED_REPLY, ReplyConfig};
use crate::ports::clock::Clock;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::prediction_provider::{PredictionProvider, PredictionRequest, ProviderError};
use crate::use_cases::prediction_poll::{InferenceError, PollState};
use async_trait::async_trait;
use counsel_domain::{ConversationHistory, SessionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that escape reply generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("AI service not configured: {0}")]
    NotConfigured(String),
}

/// Produces assistant reply text for a session's history.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(
        &self,
        session_id: &SessionId,
        history: &ConversationHistory,
    ) -> Result<String, ReplyError>;
}

/// Reply generator backed by a [`PredictionProvider`].
pub struct GenerateReplyUseCase {
    provider: Arc<dyn PredictionProvider>,
    clock: Arc<dyn Clock>,
    config: ReplyConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerateReplyUseCase {
    pub fn new(provider: Arc<dyn PredictionProvider>, clock: Arc<dyn Clock>, config: ReplyConfig) -> Self {
        Self {
            provider,
            clock,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &ReplyConfig {
        &self.config
    }

    /// Build the provider request for a history.
    pub fn build_request(&self, history: &ConversationHistory) -> PredictionRequest {
        PredictionRequest {
            model: self.config.generation.model.clone(),
            messages: history.to_prompt(&self.config.persona),
            temperature: self.config.generation.temperature,
            max_tokens: self.config.generation.max_tokens,
        }
    }

    /// Submit and wait for completion, without the degrade policy.
    pub async fn complete(&self, request: &PredictionRequest) -> Result<String, InferenceError> {
        let submission = self.provider.submit(request).await?;
        let mut state = PollState::from_submission(submission);

        loop {
            state = match state {
                PollState::Submitted { id } => self.poll_once(id, 0).await,
                PollState::Polling { id, attempt } => self.poll_once(id, attempt).await,
                PollState::Succeeded { text } => return Ok(text),
                PollState::Failed { error } => return Err(error),
                PollState::TimedOut { attempts } => {
                    return Err(InferenceError::Timeout { attempts });
                }
            };
        }
    }

    async fn poll_once(&self, id: String, completed: u32) -> PollState {
        let policy = self.config.poll;
        self.clock.sleep(policy.interval).await;

        let outcome = self.provider.fetch(&id).await;
        if let Err(e) = &outcome {
            warn!(
                prediction = %id,
                attempt = completed + 1,
                "Polling attempt failed: {}",
                e
            );
        }

        let next = PollState::advance(id, completed, outcome, policy.max_attempts);
        debug!("Prediction poll state: {:?}", next);
        next
    }
}

#[async_trait]
impl ReplyGenerator for GenerateReplyUseCase {
    async fn generate_reply(
        &self,
        session_id: &SessionId,
        history: &ConversationHistory,
    ) -> Result<String, ReplyError> {
        let request = self.build_request(history);
        debug!(
            session = %session_id,
            "Requesting reply from {} with {} messages",
            request.model,
            request.messages.len()
        );

        match self.complete(&request).await {
            Ok(text) => {
                info!(session = %session_id, "Reply generated ({} bytes)", text.len());
                self.conversation_logger.log(ConversationEvent::new(
                    "reply_generated",
                    serde_json::json!({
                        "session_id": session_id.as_str(),
                        "model": request.model,
                        "bytes": text.len(),
                    }),
                ));
                Ok(text)
            }
            Err(InferenceError::Provider(ProviderError::NotConfigured(reason))) => {
                error!("AI service not configured: {}", reason);
                Err(ReplyError::NotConfigured(reason))
            }
            Err(e) => {
                error!(session = %session_id, "AI reply failed, degrading: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "reply_degraded",
                    serde_json::json!({
                        "session_id": session_id.as_str(),
                        "model": request.model,
                        "error": e.to_string(),
                    }),
                ));
                Ok(DEGRADED_REPLY.to_string())
            }
        }
    }
}
