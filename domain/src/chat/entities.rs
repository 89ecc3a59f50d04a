//! Chat domain entities

use super::value_objects::{MessageId, OwnerId, SessionId, SessionTitle};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Map an arbitrary role tag to a provider-safe role.
    ///
    /// Anything other than `assistant` or `system` becomes `user`.
    pub fn normalize(tag: &str) -> Role {
        match tag {
            "assistant" => Role::Assistant,
            "system" => Role::System,
            _ => Role::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// A conversation owned by a single user (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: SessionId,
    pub owner_id: OwnerId,
    pub title: SessionTitle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Empty until the first turn completes.
    pub last_message_at: Option<DateTime<Utc>>,
}

impl ChatSession {
    pub fn new(id: SessionId, owner_id: OwnerId, title: SessionTitle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            title,
            created_at: now,
            updated_at: now,
            last_message_at: None,
        }
    }

    /// Whether `owner` is the principal allowed to see this session.
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        &self.owner_id == owner
    }

    /// Sort key for session listings: most recent activity first.
    ///
    /// Sessions without messages sort after those with messages, then by
    /// creation time, newest first.
    pub fn activity_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .last_message_at
            .cmp(&self.last_message_at)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

/// A single immutable message in a session (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub session_id: SessionId,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
