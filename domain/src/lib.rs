//! Domain layer for career-counsel
//!
//! This crate contains the core entities and value objects of the chat
//! system. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`ChatSession`] is a conversation owned by exactly one user. It is only
//! visible to and mutable by its owner.
//!
//! ## Turn
//!
//! One user message followed by exactly one assistant reply. Messages are
//! immutable once created and ordered by their [`MessageId`].
//!
//! ## History
//!
//! [`ConversationHistory`] is the bounded, role-normalized view of a
//! session's messages that gets sent to the inference provider.

pub mod chat;
pub mod core;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use chat::{
    entities::{ChatMessage, ChatSession, Role},
    history::{ConversationHistory, HistoryEntry, PromptMessage},
    value_objects::{MessageContent, MessageId, OwnerId, SessionId, SessionTitle},
};
pub use core::{
    error::DomainError,
    limits::{
        DEFAULT_SESSION_TITLE, HISTORY_MAX_ENTRIES, HISTORY_MAX_ENTRY_CHARS, MAX_CONTENT_CHARS,
        MAX_TITLE_CHARS, MESSAGE_LIST_LIMIT, RATE_LIMIT_MAX_MESSAGES, RATE_LIMIT_WINDOW_SECS,
    },
};
pub use prompt::persona::Persona;
