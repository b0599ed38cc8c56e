//! Tool that lets an agent inside a loop end the iteration.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolContext};
use super::types::ToolParameters;
use crate::error::AdkError;

/// Name the model calls to stop the enclosing loop.
pub const EXIT_LOOP_TOOL_NAME: &str = "exit_loop";

/// Sets `escalate` and `skip_summarization` on the calling turn, so the
/// agent stops after the call and the enclosing [`crate::agent::LoopAgent`]
/// stops iterating.
#[derive(Debug)]
pub struct ExitLoopTool {
    parameters: ToolParameters,
}

impl ExitLoopTool {
    pub fn new() -> Self {
        Self {
            parameters: ToolParameters::empty(),
        }
    }
}

impl Default for ExitLoopTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ExitLoopTool {
    fn name(&self) -> &str {
        EXIT_LOOP_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Exits the loop.\n\nCall this function only when you are instructed to do so."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        _args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AdkError> {
        tracing::debug!(agent = %ctx.agent_name, "exit_loop called");
        ctx.escalate();
        ctx.skip_summarization();
        Ok(serde_json::json!({}))
    }
}
