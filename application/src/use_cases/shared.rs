//! Shared helpers for use cases.
//!
//! Contains the single ownership guard used by every session-scoped
//! operation, and the optional per-session turn gate.

use crate::error::ChatError;
use crate::ports::conversation_store::ConversationStore;
use counsel_domain::{ChatSession, OwnerId, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

/// Load a session on behalf of `owner_id`.
///
/// Returns [`ChatError::NotFoundOrForbidden`] when the session is missing
/// or owned by someone else.
pub(crate) async fn authorize_session(
    store: &dyn ConversationStore,
    session_id: &SessionId,
    owner_id: &OwnerId,
) -> Result<ChatSession, ChatError> {
    match store.find_session_for_owner(session_id, owner_id).await? {
        Some(session) if session.is_owned_by(owner_id) => Ok(session),
        _ => {
            debug!(session = %session_id, "Session lookup denied");
            Err(ChatError::NotFoundOrForbidden)
        }
    }
}

/// Per-session mutual exclusion for chat turns.
///
/// When enabled, two turns on the same session run one after the other, so
/// the rate limit check and the history read observe each other's writes.
#[derive(Default)]
pub(crate) struct SessionGate {
    locks: Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionGate {
    pub(crate) async fn enter(&self, session_id: &SessionId) -> SessionPass<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(session_id.clone()).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        SessionPass {
            gate: self,
            session_id: session_id.clone(),
            guard: Some(guard),
        }
    }

    fn release(&self, session_id: &SessionId) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map itself still holds the lock: nobody is waiting.
        if let Some(lock) = locks.get(session_id)
            && Arc::strong_count(lock) == 1
        {
            locks.remove(session_id);
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}

/// Held for the duration of a gated turn.
pub(crate) struct SessionPass<'a> {
    gate: &'a SessionGate,
    session_id: SessionId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionPass<'_> {
    fn drop(&mut self) {
        // Drop the guard first so its Arc no longer counts.
        self.guard.take();
        self.gate.release(&self.session_id);
    }
}
