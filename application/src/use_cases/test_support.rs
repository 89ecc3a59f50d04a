//! Hand-written fakes shared by the use case tests.

use crate::ports::clock::Clock;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::ports::prediction_provider::{
    Prediction, PredictionProvider, PredictionRequest, PredictionStatus, ProviderError,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use counsel_domain::{
    ChatMessage, ChatSession, MessageId, OwnerId, Role, SessionId, SessionTitle,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ==================== Clock ====================

/// Clock whose time only moves when slept or advanced.
pub(crate) struct FakeClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub(crate) fn new() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(duration).unwrap();
    }

    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

// ==================== Store ====================

#[derive(Default)]
struct StoreState {
    sessions: Vec<ChatSession>,
    messages: Vec<ChatMessage>,
    next_id: i64,
}

/// In-memory store with an injectable write failure.
#[derive(Default)]
pub(crate) struct FakeStore {
    state: Mutex<StoreState>,
    fail_inserts_after: Mutex<Option<usize>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_session(self, id: &str, owner: &str) -> Self {
        let session = ChatSession::new(
            SessionId::new(id),
            OwnerId::new(owner),
            SessionTitle::default(),
            Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
        );
        self.state.lock().unwrap().sessions.push(session);
        self
    }

    /// Let `n` more inserts succeed, then fail every insert.
    pub(crate) fn fail_inserts_after(&self, n: usize) {
        *self.fail_inserts_after.lock().unwrap() = Some(n);
    }

    pub(crate) fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    pub(crate) fn session(&self, id: &str) -> Option<ChatSession> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| s.id.as_str() == id)
            .cloned()
    }

    pub(crate) fn seed_message(&self, session_id: &str, role: Role, content: &str, at: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = MessageId::new(state.next_id);
        state.messages.push(ChatMessage {
            id,
            session_id: SessionId::new(session_id),
            role,
            content: content.to_string(),
            created_at: at,
        });
    }
}

#[async_trait]
impl ConversationStore for FakeStore {
    async fn create_session(&self, session: &ChatSession) -> Result<(), StoreError> {
        self.state.lock().unwrap().sessions.push(session.clone());
        Ok(())
    }

    async fn find_session_for_owner(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
    ) -> Result<Option<ChatSession>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| &s.id == session_id && &s.owner_id == owner_id)
            .cloned())
    }

    async fn list_sessions(&self, owner_id: &OwnerId) -> Result<Vec<ChatSession>, StoreError> {
        let mut sessions: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| &s.owner_id == owner_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| a.activity_cmp(b));
        Ok(sessions)
    }

    async fn rename_session(
        &self,
        session_id: &SessionId,
        title: &SessionTitle,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(session) = state.sessions.iter_mut().find(|s| &s.id == session_id) {
            session.title = title.clone();
            session.updated_at = updated_at;
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.sessions.retain(|s| &s.id != session_id);
        state.messages.retain(|m| &m.session_id != session_id);
        Ok(())
    }

    async fn list_messages(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let state = self.state.lock().unwrap();
        let mut messages: Vec<_> = state
            .messages
            .iter()
            .filter(|m| &m.session_id == session_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.id);
        if let Some(limit) = limit {
            messages.truncate(limit);
        }
        Ok(messages)
    }

    async fn count_messages_since(
        &self,
        session_id: &SessionId,
        since: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| &m.session_id == session_id && m.created_at > since)
            .count())
    }

    async fn insert_message(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<ChatMessage, StoreError> {
        {
            let mut budget = self.fail_inserts_after.lock().unwrap();
            if let Some(remaining) = budget.as_mut() {
                if *remaining == 0 {
                    return Err(StoreError::Unavailable("injected failure".to_string()));
                }
                *remaining -= 1;
            }
        }

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let message = ChatMessage {
            id: MessageId::new(state.next_id),
            session_id: session_id.clone(),
            role,
            content: content.to_string(),
            created_at,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn update_session_timestamps(
        &self,
        session_id: &SessionId,
        last_message_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(session) = state.sessions.iter_mut().find(|s| &s.id == session_id) {
            session.last_message_at = Some(last_message_at);
            session.updated_at = updated_at;
        }
        Ok(())
    }
}

// ==================== Provider ====================

/// Provider that replays scripted submit and fetch outcomes.
pub(crate) struct ScriptedProvider {
    submit: Mutex<Option<Result<Prediction, ProviderError>>>,
    fetches: Mutex<VecDeque<Result<Prediction, ProviderError>>>,
    /// Returned once the fetch script runs out.
    fallback: Result<Prediction, ProviderError>,
    pub(crate) requests: Mutex<Vec<PredictionRequest>>,
    pub(crate) fetch_count: Mutex<u32>,
}

impl ScriptedProvider {
    pub(crate) fn new(submit: Result<Prediction, ProviderError>) -> Self {
        Self {
            submit: Mutex::new(Some(submit)),
            fetches: Mutex::new(VecDeque::new()),
            fallback: Ok(processing()),
            requests: Mutex::new(Vec::new()),
            fetch_count: Mutex::new(0),
        }
    }

    /// Provider that answers every submission immediately.
    pub(crate) fn replying(text: &str) -> Self {
        Self::new(Ok(succeeded(text)))
    }

    pub(crate) fn then(self, fetch: Result<Prediction, ProviderError>) -> Self {
        self.fetches.lock().unwrap().push_back(fetch);
        self
    }

    pub(crate) fn otherwise(mut self, fallback: Result<Prediction, ProviderError>) -> Self {
        self.fallback = fallback;
        self
    }

    pub(crate) fn last_request(&self) -> Option<PredictionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn fetches(&self) -> u32 {
        *self.fetch_count.lock().unwrap()
    }
}

#[async_trait]
impl PredictionProvider for ScriptedProvider {
    async fn submit(&self, request: &PredictionRequest) -> Result<Prediction, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self.submit.lock().unwrap().clone();
        scripted.unwrap_or_else(|| Err(ProviderError::Transport("no submit scripted".to_string())))
    }

    async fn fetch(&self, _prediction_id: &str) -> Result<Prediction, ProviderError> {
        *self.fetch_count.lock().unwrap() += 1;
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub(crate) fn processing() -> Prediction {
    Prediction {
        id: Some("pred-1".to_string()),
        status: PredictionStatus::Processing,
        output: None,
        error: None,
    }
}

pub(crate) fn succeeded(text: &str) -> Prediction {
    Prediction {
        id: Some("pred-1".to_string()),
        status: PredictionStatus::Succeeded,
        output: Some(vec![text.to_string()]),
        error: None,
    }
}

pub(crate) fn failed(reason: &str) -> Prediction {
    Prediction {
        id: Some("pred-1".to_string()),
        status: PredictionStatus::Failed,
        output: None,
        error: Some(reason.to_string()),
    }
}

// ==================== Logger ====================

/// Logger that keeps event types in memory.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
