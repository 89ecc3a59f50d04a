//! Conversation store adapters

mod sqlite;

pub use sqlite::{CHAT_SCHEMA_VERSION, SqliteConversationStore};
