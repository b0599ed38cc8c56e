//! Tool system for function calling.

pub mod agent_tool;
pub mod arguments;
pub mod builtin;
pub mod exit_loop;
pub mod google_search;
pub mod result;
pub mod tool;
pub mod types;
pub mod validation;

pub use agent_tool::AgentTool;
pub use arguments::ToolArguments;
pub use exit_loop::{ExitLoopTool, EXIT_LOOP_TOOL_NAME};
pub use google_search::GoogleSearchTool;
pub use result::{ToolResult, ToolStatus};
pub use tool::{FunctionTool, Tool, ToolContext};
pub use types::{ParameterBuilder, ToolParameters};
pub use validation::validate_arguments;
