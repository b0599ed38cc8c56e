//! Conversation sessions keyed by (app, user, session id).

pub mod in_memory;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent_loop::events::Event;
use crate::error::AdkError;

pub use in_memory::InMemorySessionService;

/// Identifies one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    pub(crate) fn not_found(&self) -> AdkError {
        AdkError::SessionNotFound {
            app_name: self.app_name.clone(),
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

/// Conversation state plus its ordered event history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
    #[serde(default)]
    pub state: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub events: Vec<Event>,
    pub last_update_time: DateTime<Utc>,
}

impl Session {
    pub fn key(&self) -> SessionKey {
        SessionKey::new(&self.app_name, &self.user_id, &self.id)
    }
}

/// Storage backend for sessions.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create a session. A random id is generated when `session_id` is `None`.
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
        state: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<Session, AdkError>;

    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>, AdkError>;

    /// Sessions of one user, without their events.
    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>, AdkError>;

    async fn delete_session(&self, key: &SessionKey) -> Result<(), AdkError>;

    /// Append an event and apply its state delta. Partial events are
    /// returned unchanged without being stored.
    async fn append_event(&self, key: &SessionKey, event: Event) -> Result<Event, AdkError>;
}
