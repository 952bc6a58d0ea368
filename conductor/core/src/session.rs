//! Session Management
//!
//! Sessions of the local router agent. A session is created once when the
//! conversation loop starts and lives for the whole process.
//!
//! # Design Philosophy
//!
//! The session service is an external collaborator. The core only needs a
//! handle it can pass to the agent loop and an id to key the transcript, so
//! the caller threads the [`Session`] between turns explicitly.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::messages::SessionId;

/// A conversation session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Application the session belongs to
    pub app_name: String,
    /// Owning user
    pub user_id: String,
    /// When the session was created (Unix timestamp ms)
    pub created_at: u64,
}

impl Session {
    /// Create a new session with a fresh ID
    pub fn new(app_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::with_id(SessionId::new(), app_name, user_id)
    }

    /// Create a session with a specific ID
    pub fn with_id(id: SessionId, app_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id,
            app_name: app_name.into(),
            user_id: user_id.into(),
            created_at: now_ms(),
        }
    }
}

/// Creates and looks up sessions
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create a new session for a user of an app
    async fn create_session(&self, app_name: &str, user_id: &str) -> anyhow::Result<Session>;

    /// Look up an existing session
    async fn get_session(&self, id: &SessionId) -> anyhow::Result<Option<Session>>;
}

/// Process-local session service
#[derive(Clone, Default)]
pub struct InMemorySessionService {
    sessions: Arc<DashMap<SessionId, Session>>,
}

impl InMemorySessionService {
    /// Create an empty service
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions created so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session has been created yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(&self, app_name: &str, user_id: &str) -> anyhow::Result<Session> {
        let session = Session::new(app_name, user_id);
        self.sessions.insert(session.id.clone(), session.clone());

        tracing::debug!(
            session_id = %session.id,
            app = app_name,
            user = user_id,
            "Created session"
        );

        Ok(session)
    }

    async fn get_session(&self, id: &SessionId) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }
}

/// Get current timestamp in milliseconds
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}
