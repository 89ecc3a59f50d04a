//! Submit Turn use case.
//!
//! Processes one chat turn:
//!
//! 1. Validate content (trimmed, non-empty, at most 4000 characters)
//! 2. Check session ownership
//! 3. Enforce the sliding rate limit (10 messages per trailing 60 seconds)
//! 4. Persist the user message
//! 5. Reload the full ordered history
//! 6. Generate the assistant reply
//! 7. Persist the assistant message
//! 8. Update the session's activity timestamps
//!
//! Steps 1-3 fail without writing anything. The user message written in
//! step 4 is never rolled back: a store failure later in the turn can leave
//! it without a paired reply.

use crate::error::ChatError;
use crate::ports::clock::Clock;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::conversation_store::ConversationStore;
use crate::use_cases::generate_reply::{ReplyError, ReplyGenerator};
use crate::use_cases::shared::{SessionGate, authorize_session};
use counsel_domain::{
    ChatMessage, ConversationHistory, MessageContent, OwnerId, RATE_LIMIT_MAX_MESSAGES,
    RATE_LIMIT_WINDOW_SECS, Role, SessionId,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Both messages stored by an accepted turn, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

/// Input for the [`SubmitTurnUseCase`].
#[derive(Debug, Clone)]
pub struct SubmitTurnInput {
    pub owner_id: OwnerId,
    pub session_id: SessionId,
    /// Raw content as received; validated by the use case.
    pub content: String,
}

impl SubmitTurnInput {
    pub fn new(owner_id: OwnerId, session_id: SessionId, content: impl Into<String>) -> Self {
        Self {
            owner_id,
            session_id,
            content: content.into(),
        }
    }
}

/// Use case for processing one chat turn.
///
/// Not idempotent: submitting the same content twice produces two turns.
pub struct SubmitTurnUseCase {
    store: Arc<dyn ConversationStore>,
    replies: Arc<dyn ReplyGenerator>,
    clock: Arc<dyn Clock>,
    conversation_logger: Arc<dyn ConversationLogger>,
    gate: Option<SessionGate>,
}

impl SubmitTurnUseCase {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        replies: Arc<dyn ReplyGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            replies,
            clock,
            conversation_logger: Arc::new(NoConversationLogger),
            gate: None,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run turns on the same session one at a time.
    pub fn with_serialized_sessions(mut self, enabled: bool) -> Self {
        self.gate = enabled.then(SessionGate::default);
        self
    }

    pub async fn execute(&self, input: SubmitTurnInput) -> Result<TurnOutcome, ChatError> {
        let result = self.run(&input).await;
        if let Err(e) = &result {
            warn!(
                session = %input.session_id,
                retryable = e.is_retryable(),
                "Turn rejected: {}",
                e
            );
            self.conversation_logger.log(ConversationEvent::new(
                "turn_rejected",
                serde_json::json!({
                    "session_id": input.session_id.as_str(),
                    "reason": e.kind(),
                    "retryable": e.is_retryable(),
                }),
            ));
        }
        result
    }

    async fn run(&self, input: &SubmitTurnInput) -> Result<TurnOutcome, ChatError> {
        let content = MessageContent::parse(&input.content)?;

        let _pass = match &self.gate {
            Some(gate) => Some(gate.enter(&input.session_id).await),
            None => None,
        };

        let session =
            authorize_session(self.store.as_ref(), &input.session_id, &input.owner_id).await?;

        let now = self.clock.now();
        let window_start = now - chrono::Duration::seconds(RATE_LIMIT_WINDOW_SECS);
        let recent = self
            .store
            .count_messages_since(&session.id, window_start)
            .await?;
        if recent >= RATE_LIMIT_MAX_MESSAGES {
            return Err(ChatError::RateLimited {
                limit: RATE_LIMIT_MAX_MESSAGES,
                window_secs: RATE_LIMIT_WINDOW_SECS,
            });
        }

        let user = self
            .store
            .insert_message(&session.id, Role::User, content.as_str(), now)
            .await?;
        self.conversation_logger.log(ConversationEvent::new(
            "turn_submitted",
            serde_json::json!({
                "session_id": session.id.as_str(),
                "message_id": user.id.value(),
                "chars": content.as_str().chars().count(),
            }),
        ));

        let messages = self.store.list_messages(&session.id, None).await?;
        let history = ConversationHistory::from_messages(&messages);

        let text = self
            .replies
            .generate_reply(&session.id, &history)
            .await
            .map_err(|e| match e {
                ReplyError::NotConfigured(reason) => ChatError::NotConfigured(reason),
            })?;

        let replied_at = self.clock.now();
        let assistant = self
            .store
            .insert_message(&session.id, Role::Assistant, &text, replied_at)
            .await?;

        self.store
            .update_session_timestamps(&session.id, replied_at, replied_at)
            .await?;

        info!(
            session = %session.id,
            "Turn completed: user #{} / assistant #{}",
            user.id,
            assistant.id
        );

        Ok(TurnOutcome { user, assistant })
    }
}
