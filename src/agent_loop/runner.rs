//! Runner: turns a user message into a lazy stream of agent events.

use std::sync::Arc;

use futures::StreamExt;
use uuid::Uuid;

use super::context::InvocationContext;
use super::events::Event;
use crate::agent::{event_stream, validate_tree, Agent, EventStream};
use crate::error::AdkError;
use crate::session::{SessionKey, SessionService};
use crate::types::Content;

/// Drives a root agent against a session store.
pub struct Runner {
    app_name: String,
    agent: Arc<dyn Agent>,
    session_service: Arc<dyn SessionService>,
}

impl Runner {
    /// Fails with [`AdkError::InvalidAgentTree`] when agent or tool names
    /// in the tree are malformed or collide.
    pub fn new(
        app_name: impl Into<String>,
        agent: Arc<dyn Agent>,
        session_service: Arc<dyn SessionService>,
    ) -> Result<Self, AdkError> {
        validate_tree(agent.as_ref())?;
        Ok(Self {
            app_name: app_name.into(),
            agent,
            session_service,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub fn session_service(&self) -> &Arc<dyn SessionService> {
        &self.session_service
    }

    /// Handle one user message.
    ///
    /// Nothing happens until the stream is polled. Every non-partial event is
    /// appended to the session before it is yielded; a failure is yielded as
    /// the final `Err` item. Dropping the stream cancels the run.
    pub fn run(&self, user_id: &str, session_id: &str, new_message: Content) -> EventStream {
        let key = SessionKey::new(&self.app_name, user_id, session_id);
        let agent = self.agent.clone();
        let sessions = self.session_service.clone();

        event_stream(async_stream::try_stream! {
            sessions
                .get_session(&key)
                .await?
                .ok_or_else(|| key.not_found())?;

            let invocation_id = format!("e-{}", Uuid::new_v4());
            tracing::info!(
                app_name = %key.app_name,
                session_id = %key.session_id,
                invocation_id = %invocation_id,
                agent = %agent.name(),
                "run started"
            );

            sessions
                .append_event(&key, Event::user(&invocation_id, new_message.clone()))
                .await?;

            let ctx = InvocationContext::new(&invocation_id, key.clone(), sessions.clone(), new_message);
            let mut events = agent.clone().run(ctx);
            let mut emitted = 0usize;
            while let Some(event) = events.next().await {
                let event = sessions.append_event(&key, event?).await?;
                emitted += 1;
                yield event;
            }

            tracing::info!(invocation_id = %invocation_id, events = emitted, "run finished");
        })
    }
}

/// Drain an event stream, stopping at the first error.
pub async fn collect_events(mut stream: EventStream) -> Result<Vec<Event>, AdkError> {
    let mut events = Vec::new();
    while let Some(event) = stream.next().await {
        events.push(event?);
    }
    Ok(events)
}
