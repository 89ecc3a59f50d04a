//! Conversation history: the bounded view of a session sent to a provider.
//!
//! History is derived, never persisted. It is recomputed from the stored
//! messages on every turn.

use super::entities::{ChatMessage, Role};
use crate::core::limits::{HISTORY_MAX_ENTRIES, HISTORY_MAX_ENTRY_CHARS};
use crate::prompt::persona::Persona;
use crate::util::truncate_chars;
use serde::{Deserialize, Serialize};

/// One role/content pair of a conversation.
///
/// The role is kept as a raw tag so that anything a caller supplies can be
/// normalized in one place before it reaches a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(message: &ChatMessage) -> Self {
        Self::new(message.role.as_str(), message.content.clone())
    }
}

/// A provider-ready message with a normalized role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// Ordered conversation history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        Self::new(messages.iter().map(HistoryEntry::from).collect())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep the most recent `max_entries` entries and cut each entry's
    /// content to `max_chars` characters.
    pub fn bounded(&self, max_entries: usize, max_chars: usize) -> Self {
        let skip = self.entries.len().saturating_sub(max_entries);
        let entries = self.entries[skip..]
            .iter()
            .map(|e| HistoryEntry::new(e.role.clone(), truncate_chars(&e.content, max_chars)))
            .collect();
        Self { entries }
    }

    /// Build the provider message list.
    ///
    /// The history is bounded to [`HISTORY_MAX_ENTRIES`] entries of at most
    /// [`HISTORY_MAX_ENTRY_CHARS`] characters, roles are normalized, and the
    /// persona's system prompt is always the first message.
    pub fn to_prompt(&self, persona: &Persona) -> Vec<PromptMessage> {
        let bounded = self.bounded(HISTORY_MAX_ENTRIES, HISTORY_MAX_ENTRY_CHARS);

        let mut messages = Vec::with_capacity(bounded.len() + 1);
        messages.push(PromptMessage {
            role: Role::System,
            content: persona.system_prompt().to_string(),
        });
        messages.extend(bounded.entries.into_iter().map(|e| PromptMessage {
            role: Role::normalize(&e.role),
            content: e.content,
        }));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> ConversationHistory {
        ConversationHistory::new(
            (0..n)
                .map(|i| {
                    let role = if i % 2 == 0 { "user" } else { "assistant" };
                    HistoryEntry::new(role, format!("message {}", i))
                })
                .collect(),
        )
    }

    #[test]
    fn test_bounded_keeps_most_recent() {
        let bounded = history_of(60).bounded(50, 4000);
        assert_eq!(bounded.len(), 50);
        assert_eq!(bounded.entries()[0].content, "message 10");
        assert_eq!(bounded.entries()[49].content, "message 59");
    }

    #[test]
    fn test_bounded_short_history_unchanged() {
        let history = history_of(3);
        assert_eq!(history.bounded(50, 4000), history);
    }

    #[test]
    fn test_bounded_truncates_content() {
        let history = ConversationHistory::new(vec![HistoryEntry::new("user", "x".repeat(5000))]);
        let bounded = history.bounded(50, 4000);
        assert_eq!(bounded.entries()[0].content.chars().count(), 4000);
    }

    #[test]
    fn test_prompt_prepends_persona() {
        let persona = Persona::new("Be helpful.");
        let history = ConversationHistory::new(vec![
            HistoryEntry::new("system", "caller system message"),
            HistoryEntry::new("user", "Hello"),
        ]);

        let prompt = history.to_prompt(&persona);
        assert_eq!(prompt.len(), 3);
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(prompt[0].content, "Be helpful.");
        assert_eq!(prompt[1].content, "caller system message");
    }

    #[test]
    fn test_prompt_normalizes_roles() {
        let persona = Persona::default();
        let history = ConversationHistory::new(vec![
            HistoryEntry::new("tool", "a"),
            HistoryEntry::new("assistant", "b"),
            HistoryEntry::new("", "c"),
        ]);

        let roles: Vec<Role> = history.to_prompt(&persona).iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
    }

    #[test]
    fn test_prompt_is_bounded() {
        let prompt = history_of(120).to_prompt(&Persona::default());
        // persona + 50 most recent
        assert_eq!(prompt.len(), 51);
        assert_eq!(prompt[1].content, "message 70");
    }
}
