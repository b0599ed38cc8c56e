//! Repeat children until escalation or an iteration cap.

use std::sync::Arc;

use futures::StreamExt;

use super::{event_stream, Agent, EventStream};
use crate::agent_loop::context::InvocationContext;

/// Runs its children in sequence, over and over. Stops as soon as a child
/// emits an event with `actions.escalate`, or after `max_iterations` passes
/// (unbounded when unset).
pub struct LoopAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
    max_iterations: Option<u32>,
}

impl LoopAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
            max_iterations: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn max_iterations(&self) -> Option<u32> {
        self.max_iterations
    }
}

impl Agent for LoopAgent {
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
            if self.sub_agents.is_empty() {
                return;
            }
            let mut iteration = 0u32;
            while self.max_iterations.map_or(true, |max| iteration < max) {
                iteration += 1;
                tracing::debug!(agent = %self.name, iteration, "loop iteration");
                for child in &self.sub_agents {
                    let mut events = child.clone().run(ctx.clone());
                    while let Some(event) = events.next().await {
                        let event = event?;
                        let escalate = event.actions.escalate;
                        yield event;
                        if escalate {
                            tracing::debug!(agent = %self.name, child = %child.name(), iteration, "loop escalated");
                            return;
                        }
                    }
                }
            }
        })
    }
}
