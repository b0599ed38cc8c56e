//! Run children one after another on the same history.

use std::sync::Arc;

use futures::StreamExt;

use super::{event_stream, Agent, EventStream};
use crate::agent_loop::context::InvocationContext;

/// Runs its children in listed order. Each child's events are in the
/// session before the next child starts, so later children see them.
pub struct SequentialAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl SequentialAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Agent for SequentialAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }

    fn run(self: Arc<Self>, ctx: InvocationContext) -> EventStream {
        event_stream(async_stream::try_stream! {
            for child in &self.sub_agents {
                tracing::debug!(agent = %self.name, child = %child.name(), "running sub-agent");
                let mut events = child.clone().run(ctx.clone());
                while let Some(event) = events.next().await {
                    yield event?;
                }
            }
        })
    }
}
