//! Session Directory use case.
//!
//! Owner-scoped CRUD over chat sessions. Every operation that names a
//! session goes through the same ownership guard, so a foreign session and
//! a missing one look identical to the caller.

use crate::error::ChatError;
use crate::ports::clock::Clock;
use crate::ports::conversation_store::ConversationStore;
use crate::use_cases::shared::authorize_session;
use counsel_domain::{
    ChatMessage, ChatSession, MESSAGE_LIST_LIMIT, OwnerId, SessionId, SessionTitle,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// A session together with its messages in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDetail {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

pub struct SessionDirectory {
    store: Arc<dyn ConversationStore>,
    clock: Arc<dyn Clock>,
}

impl SessionDirectory {
    pub fn new(store: Arc<dyn ConversationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Sessions owned by `owner_id`, most recently active first.
    pub async fn list_sessions(&self, owner_id: &OwnerId) -> Result<Vec<ChatSession>, ChatError> {
        let mut sessions = self.store.list_sessions(owner_id).await?;
        sessions.sort_by(|a, b| a.activity_cmp(b));
        Ok(sessions)
    }

    pub async fn get_session(
        &self,
        owner_id: &OwnerId,
        session_id: &SessionId,
    ) -> Result<SessionDetail, ChatError> {
        let session = authorize_session(self.store.as_ref(), session_id, owner_id).await?;
        let messages = self.store.list_messages(&session.id, None).await?;
        Ok(SessionDetail { session, messages })
    }

    /// Create a session. A missing title becomes "New Career Chat".
    pub async fn create_session(
        &self,
        owner_id: &OwnerId,
        title: Option<&str>,
    ) -> Result<ChatSession, ChatError> {
        let title = SessionTitle::parse_or_default(title)?;
        let session = ChatSession::new(
            SessionId::new(Uuid::new_v4().to_string()),
            owner_id.clone(),
            title,
            self.clock.now(),
        );
        self.store.create_session(&session).await?;
        info!(session = %session.id, owner = %owner_id, "Session created");
        Ok(session)
    }

    pub async fn rename_session(
        &self,
        owner_id: &OwnerId,
        session_id: &SessionId,
        title: &str,
    ) -> Result<ChatSession, ChatError> {
        let title = SessionTitle::parse(title)?;
        let mut session = authorize_session(self.store.as_ref(), session_id, owner_id).await?;
        let now = self.clock.now();
        self.store.rename_session(&session.id, &title, now).await?;
        session.title = title;
        session.updated_at = now;
        Ok(session)
    }

    /// Delete a session and, with it, all of its messages.
    pub async fn delete_session(
        &self,
        owner_id: &OwnerId,
        session_id: &SessionId,
    ) -> Result<(), ChatError> {
        let session = authorize_session(self.store.as_ref(), session_id, owner_id).await?;
        self.store.delete_session(&session.id).await?;
        info!(session = %session.id, "Session deleted");
        Ok(())
    }

    /// The first 100 messages of a session in creation order.
    pub async fn list_messages(
        &self,
        owner_id: &OwnerId,
        session_id: &SessionId,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let session = authorize_session(self.store.as_ref(), session_id, owner_id).await?;
        Ok(self
            .store
            .list_messages(&session.id, Some(MESSAGE_LIST_LIMIT))
            .await?)
    }
}
