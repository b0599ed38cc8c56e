//! Per-invocation state shared by the agents of one run.

use std::sync::Arc;

use super::events::Event;
use crate::error::AdkError;
use crate::session::{SessionKey, SessionService};
use crate::types::Content;

/// Everything an agent needs while handling one user message.
#[derive(Clone)]
pub struct InvocationContext {
    pub invocation_id: String,
    /// Dotted agent path; `None` outside any parallel fan-out.
    pub branch: Option<String>,
    pub user_content: Content,
    pub session: SessionKey,
    session_service: Arc<dyn SessionService>,
}

impl InvocationContext {
    pub fn new(
        invocation_id: impl Into<String>,
        session: SessionKey,
        session_service: Arc<dyn SessionService>,
        user_content: Content,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            branch: None,
            user_content,
            session,
            session_service,
        }
    }

    pub fn session_service(&self) -> &Arc<dyn SessionService> {
        &self.session_service
    }

    /// Fresh event authored by `author` on this context's branch.
    pub fn new_event(&self, author: &str) -> Event {
        Event::new(&self.invocation_id, author).with_branch(self.branch.clone())
    }

    /// Context for `child` running in isolation under `parent`.
    pub fn for_child_branch(&self, parent: &str, child: &str) -> Self {
        let suffix = format!("{parent}.{child}");
        let branch = match &self.branch {
            Some(current) => format!("{current}.{suffix}"),
            None => suffix,
        };
        Self {
            branch: Some(branch),
            ..self.clone()
        }
    }

    /// Session events visible from this context's branch.
    pub async fn visible_events(&self) -> Result<Vec<Event>, AdkError> {
        let session = self
            .session_service
            .get_session(&self.session)
            .await?
            .ok_or_else(|| self.session.not_found())?;
        Ok(session
            .events
            .into_iter()
            .filter(|e| is_visible(self.branch.as_deref(), e.branch.as_deref()))
            .collect())
    }
}

impl std::fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("invocation_id", &self.invocation_id)
            .field("branch", &self.branch)
            .field("session", &self.session)
            .finish()
    }
}

/// An event is visible when either side has no branch, or the event's
/// branch is the viewer's branch or one of its dotted ancestors.
pub fn is_visible(viewer: Option<&str>, event: Option<&str>) -> bool {
    match (viewer, event) {
        (None, _) | (_, None) => true,
        (Some(viewer), Some(event)) => {
            viewer == event
                || viewer
                    .strip_prefix(event)
                    .is_some_and(|rest| rest.starts_with('.'))
        }
    }
}
