//! Expose an agent as a callable tool.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolContext};
use super::types::ToolParameters;
use crate::agent::Agent;
use crate::agent_loop::runner::Runner;
use crate::error::AdkError;
use crate::session::{InMemorySessionService, SessionService};
use crate::types::Content;

/// Runs a wrapped agent to completion in a private in-memory session and
/// returns its last text reply.
pub struct AgentTool {
    agent: Arc<dyn Agent>,
    skip_summarization: bool,
    parameters: ToolParameters,
}

impl AgentTool {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            skip_summarization: false,
            parameters: ToolParameters::object()
                .string("request", "The input to forward to the agent.", true)
                .build(),
        }
    }

    /// End the caller's turn with this tool's response instead of a
    /// model-written summary of it.
    pub fn with_skip_summarization(mut self, skip: bool) -> Self {
        self.skip_summarization = skip;
        self
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AdkError> {
        let request = args.get_str("request")?;
        let app_name = self.agent.name().to_string();
        let user_id = ctx.session.user_id.clone();

        let sessions: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
        let session = sessions
            .create_session(&app_name, &user_id, None, None)
            .await?;
        let runner = Runner::new(app_name, self.agent.clone(), sessions)?;

        tracing::debug!(tool = %self.agent.name(), caller = %ctx.agent_name, "running agent tool");
        let mut stream = runner.run(&user_id, &session.id, Content::user(request));
        let mut last_text = String::new();
        while let Some(event) = stream.next().await {
            let event = event?;
            if let Some(content) = &event.content {
                if content.has_text() {
                    last_text = content.text();
                }
            }
        }

        if self.skip_summarization {
            ctx.skip_summarization();
        }
        Ok(serde_json::Value::String(last_text))
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("agent", &self.agent.name())
            .field("skip_summarization", &self.skip_summarization)
            .finish()
    }
}
