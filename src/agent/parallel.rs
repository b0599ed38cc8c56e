//! Run children concurrently on isolated branches.

use std::sync::Arc;

use futures::stream::select_all;
use futures::StreamExt;

use super::{event_stream, Agent, EventStream};
use crate::agent_loop::context::InvocationContext;

/// Runs all children at once. Each child gets its own branch
/// (`parent.child`) and so does not see its siblings' events. Events are
/// yielded in arrival order; the agent finishes when every child has.
pub struct ParallelAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl ParallelAgent {
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

impl Agent for ParallelAgent {
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
            let streams = self.sub_agents.iter().map(|child| {
                let child_ctx = ctx.for_child_branch(&self.name, child.name());
                child.clone().run(child_ctx)
            });
            let mut merged = select_all(streams);
            tracing::debug!(agent = %self.name, children = self.sub_agents.len(), "fan-out started");
            while let Some(event) = merged.next().await {
                yield event?;
            }
        })
    }
}
