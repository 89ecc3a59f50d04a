//! Conversation store port
//!
//! Durable persistence for sessions and messages. The store exclusively owns
//! persisted records; use cases only hold request-scoped copies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use counsel_domain::{ChatMessage, ChatSession, OwnerId, Role, SessionId, SessionTitle};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Durable store for chat sessions and their messages
///
/// Implementations must provide atomic single-row inserts and updates.
/// No multi-statement transaction is expected across calls.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist a newly created session
    async fn create_session(&self, session: &ChatSession) -> Result<(), StoreError>;

    /// Find a session only if it is owned by `owner_id`
    async fn find_session_for_owner(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
    ) -> Result<Option<ChatSession>, StoreError>;

    /// List an owner's sessions, most recent activity first
    async fn list_sessions(&self, owner_id: &OwnerId) -> Result<Vec<ChatSession>, StoreError>;

    /// Change a session's title and bump its update timestamp
    async fn rename_session(
        &self,
        session_id: &SessionId,
        title: &SessionTitle,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Delete a session and, by cascade, all of its messages
    async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError>;

    /// List messages ordered by id ascending, optionally capped at `limit`
    async fn list_messages(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, StoreError>;

    /// Count messages created strictly after `since`
    async fn count_messages_since(
        &self,
        session_id: &SessionId,
        since: DateTime<Utc>,
    ) -> Result<usize, StoreError>;

    /// Append an immutable message and return the stored record
    async fn insert_message(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<ChatMessage, StoreError>;

    /// Record activity on a session
    async fn update_session_timestamps(
        &self,
        session_id: &SessionId,
        last_message_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}
