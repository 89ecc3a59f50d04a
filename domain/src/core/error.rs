//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message content cannot be empty")]
    EmptyContent,

    #[error("Message content is {len} characters, the maximum is {max}")]
    ContentTooLong { len: usize, max: usize },

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl DomainError {
    /// Check if this error was caused by caller-supplied input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyContent
                | DomainError::ContentTooLong { .. }
                | DomainError::InvalidTitle(_)
        )
    }
}
