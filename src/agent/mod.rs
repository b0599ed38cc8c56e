//! Agents: LLM-backed agents and their sequential, parallel and loop
//! compositions.

pub mod llm;
pub mod loop_agent;
pub mod parallel;
pub mod sequential;

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::Stream;

use crate::agent_loop::context::InvocationContext;
use crate::agent_loop::events::{Event, USER_AUTHOR};
use crate::error::AdkError;
use crate::tools::Tool;

pub use llm::{LlmAgent, DEFAULT_MAX_MODEL_CALLS};
pub use loop_agent::LoopAgent;
pub use parallel::ParallelAgent;
pub use sequential::SequentialAgent;

/// Stream of events produced by an agent or a runner.
pub type EventStream = BoxStream<'static, Result<Event, AdkError>>;

/// Box a stream of agent events.
pub fn event_stream<S>(stream: S) -> EventStream
where
    S: Stream<Item = Result<Event, AdkError>> + Send + 'static,
{
    Box::pin(stream)
}

/// A node of an agent tree.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &[]
    }

    fn tools(&self) -> &[Arc<dyn Tool>] {
        &[]
    }

    /// Handle the invocation. The stream is lazy and owns everything it
    /// needs, so it can outlive the caller's borrow of the agent.
    fn run(self: Arc<Self>, ctx: InvocationContext) -> EventStream;
}

impl std::fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent").field("name", &self.name()).finish()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check an agent tree: identifier names, no agent called `user`, agent
/// names unique across the tree, tool names unique per agent.
pub fn validate_tree(root: &dyn Agent) -> Result<(), AdkError> {
    let mut seen = HashSet::new();
    validate_node(root, &mut seen)
}

fn validate_node<'a>(agent: &'a dyn Agent, seen: &mut HashSet<&'a str>) -> Result<(), AdkError> {
    let name = agent.name();
    if !is_identifier(name) {
        return Err(AdkError::InvalidAgentTree(format!(
            "agent name '{name}' must be an identifier"
        )));
    }
    if name == USER_AUTHOR {
        return Err(AdkError::InvalidAgentTree(format!(
            "agent name '{USER_AUTHOR}' is reserved"
        )));
    }
    if !seen.insert(name) {
        return Err(AdkError::InvalidAgentTree(format!(
            "duplicate agent name '{name}'"
        )));
    }

    let mut tool_names = HashSet::new();
    for tool in agent.tools() {
        if !tool_names.insert(tool.name()) {
            return Err(AdkError::InvalidAgentTree(format!(
                "agent '{name}' declares tool '{}' more than once",
                tool.name()
            )));
        }
    }

    for child in agent.sub_agents() {
        validate_node(child.as_ref(), seen)?;
    }
    Ok(())
}

/// Depth-first search for an agent by name.
pub fn find_agent(root: &Arc<dyn Agent>, name: &str) -> Option<Arc<dyn Agent>> {
    if root.name() == name {
        return Some(root.clone());
    }
    root.sub_agents().iter().find_map(|child| find_agent(child, name))
}
