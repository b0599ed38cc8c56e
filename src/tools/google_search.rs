//! Model-side Google Search grounding.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolContext};
use super::types::ToolParameters;
use crate::error::AdkError;
use crate::provider::ToolDeclaration;

/// Declares Google Search grounding to the model.
///
/// The search runs on the model side; the agent never executes this tool
/// locally. An unexpected local call fails as a tool execution error.
#[derive(Debug)]
pub struct GoogleSearchTool {
    parameters: ToolParameters,
}

impl GoogleSearchTool {
    pub fn new() -> Self {
        Self {
            parameters: ToolParameters::empty(),
        }
    }
}

impl Default for GoogleSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Searches the web with Google Search."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration::GoogleSearch
    }

    async fn execute(
        &self,
        _args: &ToolArguments,
        _ctx: &ToolContext,
    ) -> Result<serde_json::Value, AdkError> {
        Err(AdkError::tool(
            self.name(),
            "executed by the model and cannot be called locally",
        ))
    }
}
