//! Value objects for the chat domain.

use crate::core::error::DomainError;
use crate::core::limits::{DEFAULT_SESSION_TITLE, MAX_CONTENT_CHARS, MAX_TITLE_CHARS};
use crate::util::char_len;
use serde::{Deserialize, Serialize};

/// Opaque, unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity of the authenticated user that owns sessions.
///
/// Supplied by the external identity collaborator; never derived from
/// request payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Store-assigned message identifier.
///
/// Monotonically increasing per store; ordering by id is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated user message content (Value Object)
///
/// Leading and trailing whitespace is removed. The untrimmed input must not
/// exceed [`MAX_CONTENT_CHARS`] and the trimmed result must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    text: String,
}

impl MessageContent {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let len = char_len(raw);
        if len > MAX_CONTENT_CHARS {
            return Err(DomainError::ContentTooLong {
                len,
                max: MAX_CONTENT_CHARS,
            });
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContent);
        }

        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for MessageContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Validated session title (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTitle(String);

impl SessionTitle {
    /// Trim and validate a title: 1 to [`MAX_TITLE_CHARS`] characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTitle("title cannot be empty".to_string()));
        }
        let len = char_len(trimmed);
        if len > MAX_TITLE_CHARS {
            return Err(DomainError::InvalidTitle(format!(
                "title is {} characters, the maximum is {}",
                len, MAX_TITLE_CHARS
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse an optional title, falling back to [`DEFAULT_SESSION_TITLE`].
    pub fn parse_or_default(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionTitle {
    fn default() -> Self {
        Self(DEFAULT_SESSION_TITLE.to_string())
    }
}

impl std::fmt::Display for SessionTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
