//! Caller-facing error taxonomy for chat operations.

use crate::ports::conversation_store::StoreError;
use counsel_domain::DomainError;
use thiserror::Error;

/// Errors surfaced by session directory and turn operations.
///
/// Provider failures are not part of this type: they are absorbed by the
/// reply generator and turned into a degraded reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The session does not exist or belongs to someone else.
    /// The two cases are indistinguishable to the caller.
    #[error("Session not found or access denied")]
    NotFoundOrForbidden,

    #[error("Rate limit exceeded: at most {limit} messages per {window_secs} seconds")]
    RateLimited { limit: usize, window_secs: i64 },

    #[error("AI service not configured: {0}")]
    NotConfigured(String),

    #[error("Storage failure: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl ChatError {
    /// Stable machine-readable kind, used in API responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::InvalidInput(_) => "invalid_input",
            ChatError::NotFoundOrForbidden => "not_found",
            ChatError::RateLimited { .. } => "rate_limited",
            ChatError::NotConfigured(_) => "not_configured",
            ChatError::StoreUnavailable(_) => "store_unavailable",
        }
    }

    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatError::RateLimited { .. } | ChatError::StoreUnavailable(_)
        )
    }
}

impl From<DomainError> for ChatError {
    fn from(error: DomainError) -> Self {
        ChatError::InvalidInput(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_becomes_invalid_input() {
        let error: ChatError = DomainError::EmptyContent.into();
        assert_eq!(
            error,
            ChatError::InvalidInput("Message content cannot be empty".to_string())
        );
        assert_eq!(error.kind(), "invalid_input");
    }

    #[test]
    fn test_store_error_becomes_store_unavailable() {
        let error: ChatError = StoreError::Unavailable("disk full".to_string()).into();
        assert!(matches!(error, ChatError::StoreUnavailable(_)));
        assert!(error.is_retryable());
    }

    #[test]
    fn test_rate_limited_display() {
        let error = ChatError::RateLimited {
            limit: 10,
            window_secs: 60,
        };
        assert_eq!(
            error.to_string(),
            "Rate limit exceeded: at most 10 messages per 60 seconds"
        );
        assert!(!ChatError::NotFoundOrForbidden.is_retryable());
    }
}
