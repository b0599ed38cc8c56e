//! Process-local session storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Session, SessionKey, SessionService};
use crate::agent_loop::events::Event;
use crate::error::AdkError;

/// Sessions held in a map behind an async lock; reads clone the session.
#[derive(Debug, Default)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<SessionKey, Session>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
        state: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<Session, AdkError> {
        let id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let key = SessionKey::new(app_name, user_id, &id);

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&key) {
            return Err(AdkError::SessionAlreadyExists {
                app_name: key.app_name,
                user_id: key.user_id,
                session_id: key.session_id,
            });
        }

        let session = Session {
            id,
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            state: state.unwrap_or_default(),
            events: Vec::new(),
            last_update_time: Utc::now(),
        };
        sessions.insert(key, session.clone());
        tracing::debug!(app_name, user_id, session_id = %session.id, "session created");
        Ok(session)
    }

    async fn get_session(&self, key: &SessionKey) -> Result<Option<Session>, AdkError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn list_sessions(&self, app_name: &str, user_id: &str) -> Result<Vec<Session>, AdkError> {
        let sessions = self.sessions.read().await;
        let mut listed: Vec<Session> = sessions
            .values()
            .filter(|s| s.app_name == app_name && s.user_id == user_id)
            .map(|s| Session {
                events: Vec::new(),
                ..s.clone()
            })
            .collect();
        listed.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listed)
    }

    async fn delete_session(&self, key: &SessionKey) -> Result<(), AdkError> {
        self.sessions.write().await.remove(key);
        Ok(())
    }

    async fn append_event(&self, key: &SessionKey, event: Event) -> Result<Event, AdkError> {
        if event.partial {
            return Ok(event);
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(key).ok_or_else(|| key.not_found())?;
        for (k, v) in &event.actions.state_delta {
            session.state.insert(k.clone(), v.clone());
        }
        session.last_update_time = event.timestamp;
        session.events.push(event.clone());
        Ok(event)
    }
}
