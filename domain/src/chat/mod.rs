//! Chat domain.
//!
//! - [`entities::ChatSession`]: a conversation owned by one user
//! - [`entities::ChatMessage`]: a single immutable message within a session
//! - [`value_objects`]: identifiers and validated content
//! - [`history::ConversationHistory`]: bounded view sent to the provider

pub mod entities;
pub mod history;
pub mod value_objects;
