//! Convenience re-exports for common use.

pub use crate::agent::{Agent, LlmAgent, LoopAgent, ParallelAgent, SequentialAgent};
pub use crate::agent_loop::{Event, EventActions, InvocationContext, Runner};
pub use crate::config::AdkConfig;
pub use crate::error::{AdkError, Result};
pub use crate::provider::ModelProvider;
pub use crate::session::{InMemorySessionService, Session, SessionKey, SessionService};
pub use crate::tools::{
    AgentTool, ExitLoopTool, FunctionTool, GoogleSearchTool, Tool, ToolArguments, ToolContext,
    ToolParameters, ToolResult,
};
pub use crate::types::{Content, FunctionCall, FunctionResponse, GenerationSettings, Part, Role};
