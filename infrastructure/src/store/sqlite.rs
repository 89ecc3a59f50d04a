//! SQLite-backed conversation store.
//!
//! One connection behind a mutex; every call runs on the blocking pool.
//! Timestamps are stored as Unix milliseconds so range queries compare
//! integers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use counsel_application::{ConversationStore, StoreError};
use counsel_domain::{ChatMessage, ChatSession, MessageId, OwnerId, Role, SessionId, SessionTitle};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

pub const CHAT_SCHEMA_VERSION: i64 = 1;

const SESSION_COLUMNS: &str = "id, owner_id, title, created_at, updated_at, last_message_at";
const MESSAGE_COLUMNS: &str = "id, session_id, role, content, created_at";

#[derive(Debug, Error)]
enum SqliteError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("unsupported schema version {found}, max supported {supported}")]
    UnsupportedSchemaVersion { found: i64, supported: i64 },
    #[error("{0}")]
    Corrupt(String),
}

impl From<SqliteError> for StoreError {
    fn from(error: SqliteError) -> Self {
        match error {
            SqliteError::Sqlite(e) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Corrupt(other.to_string()),
        }
    }
}

type SessionRow = (String, String, String, i64, i64, Option<i64>);
type MessageRow = (i64, String, String, String, i64);

pub struct SqliteConversationStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteConversationStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(SqliteError::from)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(SqliteError::from)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(SqliteError::from)?;
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, SqliteError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            f(&guard).map_err(StoreError::from)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
    }
}

fn migrate(conn: &Connection) -> Result<(), SqliteError> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current > CHAT_SCHEMA_VERSION {
        return Err(SqliteError::UnsupportedSchemaVersion {
            found: current,
            supported: CHAT_SCHEMA_VERSION,
        });
    }

    if current < 1 {
        conn.execute_batch(include_str!("../../migrations/0001_chat_schema.sql"))?;
        conn.execute_batch("PRAGMA user_version = 1;")?;
        debug!("Applied chat schema migration 1");
    }

    Ok(())
}

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, SqliteError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| SqliteError::Corrupt(format!("timestamp out of range: {}", ms)))
}

fn session_from_row(row: SessionRow) -> Result<ChatSession, SqliteError> {
    let (id, owner_id, title, created_at, updated_at, last_message_at) = row;
    Ok(ChatSession {
        id: SessionId::new(id),
        owner_id: OwnerId::new(owner_id),
        title: SessionTitle::parse(&title)
            .map_err(|e| SqliteError::Corrupt(format!("session title: {}", e)))?,
        created_at: from_millis(created_at)?,
        updated_at: from_millis(updated_at)?,
        last_message_at: last_message_at.map(from_millis).transpose()?,
    })
}

fn message_from_row(row: MessageRow) -> Result<ChatMessage, SqliteError> {
    let (id, session_id, role, content, created_at) = row;
    Ok(ChatMessage {
        id: MessageId::new(id),
        session_id: SessionId::new(session_id),
        role: role
            .parse::<Role>()
            .map_err(|e| SqliteError::Corrupt(e.to_string()))?,
        content,
        created_at: from_millis(created_at)?,
    })
}

fn read_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn read_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn create_session(&self, session: &ChatSession) -> Result<(), StoreError> {
        let session = session.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO chat_sessions (id, owner_id, title, created_at, updated_at, last_message_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    session.id.as_str(),
                    session.owner_id.as_str(),
                    session.title.as_str(),
                    to_millis(session.created_at),
                    to_millis(session.updated_at),
                    session.last_message_at.map(to_millis),
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn find_session_for_owner(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
    ) -> Result<Option<ChatSession>, StoreError> {
        let session_id = session_id.clone();
        let owner_id = owner_id.clone();
        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM chat_sessions WHERE id = ?1 AND owner_id = ?2",
                        SESSION_COLUMNS
                    ),
                    params![session_id.as_str(), owner_id.as_str()],
                    read_session,
                )
                .optional()?;
            row.map(session_from_row).transpose()
        })
        .await
    }

    async fn list_sessions(&self, owner_id: &OwnerId) -> Result<Vec<ChatSession>, StoreError> {
        let owner_id = owner_id.clone();
        self.with_conn(move |conn| {
            let mut statement = conn.prepare(&format!(
                "SELECT {} FROM chat_sessions WHERE owner_id = ?1
                 ORDER BY last_message_at IS NULL, last_message_at DESC, created_at DESC",
                SESSION_COLUMNS
            ))?;
            let rows = statement
                .query_map([owner_id.as_str()], read_session)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(session_from_row).collect()
        })
        .await
    }

    async fn rename_session(
        &self,
        session_id: &SessionId,
        title: &SessionTitle,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let session_id = session_id.clone();
        let title = title.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE chat_sessions SET title = ?2, updated_at = ?3 WHERE id = ?1",
                params![session_id.as_str(), title.as_str(), to_millis(updated_at)],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let session_id = session_id.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM chat_sessions WHERE id = ?1",
                [session_id.as_str()],
            )?;
            Ok(())
        })
        .await
    }

    async fn list_messages(
        &self,
        session_id: &SessionId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let session_id = session_id.clone();
        // SQLite treats a negative LIMIT as no limit
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        self.with_conn(move |conn| {
            let mut statement = conn.prepare(&format!(
                "SELECT {} FROM chat_messages WHERE session_id = ?1 ORDER BY id ASC LIMIT ?2",
                MESSAGE_COLUMNS
            ))?;
            let rows = statement
                .query_map(params![session_id.as_str(), limit], read_message)?
                .collect::<Result<Vec<_>, _>>()?;
            rows.into_iter().map(message_from_row).collect()
        })
        .await
    }

    async fn count_messages_since(
        &self,
        session_id: &SessionId,
        since: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let session_id = session_id.clone();
        self.with_conn(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM chat_messages WHERE session_id = ?1 AND created_at > ?2",
                params![session_id.as_str(), to_millis(since)],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
        .await
    }

    async fn insert_message(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<ChatMessage, StoreError> {
        let session_id = session_id.clone();
        let content = content.to_string();
        self.with_conn(move |conn| {
            let created_ms = to_millis(created_at);
            conn.execute(
                "INSERT INTO chat_messages (session_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session_id.as_str(), role.as_str(), content, created_ms],
            )?;
            Ok(ChatMessage {
                id: MessageId::new(conn.last_insert_rowid()),
                session_id,
                role,
                content,
                created_at: from_millis(created_ms)?,
            })
        })
        .await
    }

    async fn update_session_timestamps(
        &self,
        session_id: &SessionId,
        last_message_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let session_id = session_id.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "UPDATE chat_sessions SET last_message_at = ?2, updated_at = ?3 WHERE id = ?1",
                params![
                    session_id.as_str(),
                    to_millis(last_message_at),
                    to_millis(updated_at)
                ],
            )?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn session(id: &str, owner: &str, created: i64) -> ChatSession {
        ChatSession::new(
            SessionId::new(id),
            OwnerId::new(owner),
            SessionTitle::default(),
            at(created),
        )
    }

    async fn store_with(sessions: &[ChatSession]) -> SqliteConversationStore {
        let store = SqliteConversationStore::open_in_memory().unwrap();
        for s in sessions {
            store.create_session(s).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let original = session("s1", "alice", 0);
        let store = store_with(std::slice::from_ref(&original)).await;

        let found = store
            .find_session_for_owner(&original.id, &original.owner_id)
            .await
            .unwrap();
        assert_eq!(found, Some(original));
    }

    #[tokio::test]
    async fn test_find_is_owner_scoped() {
        let store = store_with(&[session("s1", "alice", 0)]).await;
        let found = store
            .find_session_for_owner(&SessionId::new("s1"), &OwnerId::new("mallory"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_activity() {
        let store = store_with(&[
            session("quiet-old", "alice", 0),
            session("quiet-new", "alice", 10),
            session("active", "alice", 5),
            session("other", "bob", 20),
        ])
        .await;
        store
            .update_session_timestamps(&SessionId::new("active"), at(30), at(30))
            .await
            .unwrap();

        let ids: Vec<String> = store
            .list_sessions(&OwnerId::new("alice"))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["active", "quiet-new", "quiet-old"]);
    }

    #[tokio::test]
    async fn test_messages_keep_insertion_order_and_limit() {
        let store = store_with(&[session("s1", "alice", 0)]).await;
        let sid = SessionId::new("s1");
        for i in 0..5 {
            store
                .insert_message(&sid, Role::User, &format!("m{}", i), at(i))
                .await
                .unwrap();
        }

        let all = store.list_messages(&sid, None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let capped = store.list_messages(&sid, Some(3)).await.unwrap();
        let contents: Vec<_> = capped.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m0", "m1", "m2"]);
    }

    #[tokio::test]
    async fn test_inserted_message_matches_stored() {
        let store = store_with(&[session("s1", "alice", 0)]).await;
        let sid = SessionId::new("s1");
        let inserted = store
            .insert_message(&sid, Role::Assistant, "Hi there", at(1))
            .await
            .unwrap();

        let listed = store.list_messages(&sid, None).await.unwrap();
        assert_eq!(listed, vec![inserted]);
    }

    #[tokio::test]
    async fn test_count_is_strictly_after() {
        let store = store_with(&[session("s1", "alice", 0)]).await;
        let sid = SessionId::new("s1");
        for i in [0, 10, 20] {
            store
                .insert_message(&sid, Role::User, "x", at(i))
                .await
                .unwrap();
        }

        assert_eq!(store.count_messages_since(&sid, at(0)).await.unwrap(), 2);
        assert_eq!(store.count_messages_since(&sid, at(-1)).await.unwrap(), 3);
        assert_eq!(store.count_messages_since(&sid, at(20)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_messages() {
        let store = store_with(&[session("s1", "alice", 0), session("s2", "alice", 0)]).await;
        store
            .insert_message(&SessionId::new("s1"), Role::User, "bye", at(1))
            .await
            .unwrap();
        store
            .insert_message(&SessionId::new("s2"), Role::User, "stay", at(1))
            .await
            .unwrap();

        store.delete_session(&SessionId::new("s1")).await.unwrap();

        assert!(
            store
                .list_messages(&SessionId::new("s1"), None)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .list_messages(&SessionId::new("s2"), None)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_rename_updates_title() {
        let store = store_with(&[session("s1", "alice", 0)]).await;
        let title = SessionTitle::parse("Interview prep").unwrap();
        store
            .rename_session(&SessionId::new("s1"), &title, at(50))
            .await
            .unwrap();

        let found = store
            .find_session_for_owner(&SessionId::new("s1"), &OwnerId::new("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, title);
        assert_eq!(found.updated_at, at(50));
        assert!(found.last_message_at.is_none());
    }

    #[tokio::test]
    async fn test_message_for_missing_session_fails() {
        let store = store_with(&[]).await;
        let result = store
            .insert_message(&SessionId::new("ghost"), Role::User, "hi", at(0))
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.db");
        {
            let store = SqliteConversationStore::open(&path).unwrap();
            store.create_session(&session("s1", "alice", 0)).await.unwrap();
            store
                .insert_message(&SessionId::new("s1"), Role::User, "remember me", at(1))
                .await
                .unwrap();
        }

        let reopened = SqliteConversationStore::open(&path).unwrap();
        let messages = reopened
            .list_messages(&SessionId::new("s1"), None)
            .await
            .unwrap();
        assert_eq!(messages[0].content, "remember me");
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        let error = migrate(&conn).unwrap_err();
        assert!(matches!(
            error,
            SqliteError::UnsupportedSchemaVersion { found: 99, .. }
        ));
    }

    struct Echo;

    #[async_trait]
    impl counsel_application::ReplyGenerator for Echo {
        async fn generate_reply(
            &self,
            _session_id: &SessionId,
            history: &counsel_domain::ConversationHistory,
        ) -> Result<String, counsel_application::ReplyError> {
            Ok(format!("{} entries so far", history.len()))
        }
    }

    #[tokio::test]
    async fn test_turn_timestamps_survive_storage() {
        use crate::SystemClock;
        use counsel_application::{Clock, SessionDirectory, SubmitTurnInput, SubmitTurnUseCase};

        let store = Arc::new(SqliteConversationStore::open_in_memory().unwrap());
        let clock = Arc::new(SystemClock);
        let directory = SessionDirectory::new(store.clone(), clock.clone());
        let turns = SubmitTurnUseCase::new(store.clone(), Arc::new(Echo), clock.clone());
        let owner = OwnerId::new("alice");

        for round in 0..4 {
            let created = directory.create_session(&owner, None).await.unwrap();
            let detail = directory.get_session(&owner, &created.id).await.unwrap();
            assert_eq!(detail.session, created);

            // Stay under the per-window cap of ten messages
            for _ in 0..5 {
                let before = clock.now();
                let outcome = turns
                    .execute(SubmitTurnInput::new(
                        owner.clone(),
                        created.id.clone(),
                        format!("turn in round {}", round),
                    ))
                    .await
                    .unwrap();
                assert!(outcome.user.created_at >= before);
                assert!(outcome.assistant.created_at >= outcome.user.created_at);

                let stored = directory.get_session(&owner, &created.id).await.unwrap();
                let last = stored.session.last_message_at.unwrap();
                assert!(last >= before);
                assert!(stored.session.updated_at >= before);
                assert_eq!(last, outcome.assistant.created_at);
                let stored_user = &stored.messages[stored.messages.len() - 2];
                assert_eq!(stored_user, &outcome.user);
            }
        }
    }
}
