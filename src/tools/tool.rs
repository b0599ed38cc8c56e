//! Tool trait, per-call context and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::ToolParameters;
use crate::agent_loop::events::EventActions;
use crate::error::AdkError;
use crate::provider::ToolDeclaration;
use crate::session::SessionKey;

/// Context available during a single tool execution.
///
/// Actions recorded here (escalation, summarization skip, state writes)
/// are merged into the function-response event the agent emits.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub invocation_id: String,
    pub agent_name: String,
    pub function_call_id: Option<String>,
    pub session: SessionKey,
    actions: Arc<Mutex<EventActions>>,
}

impl ToolContext {
    pub fn new(
        invocation_id: impl Into<String>,
        agent_name: impl Into<String>,
        function_call_id: Option<String>,
        session: SessionKey,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            agent_name: agent_name.into(),
            function_call_id,
            session,
            actions: Arc::new(Mutex::new(EventActions::default())),
        }
    }

    /// Ask the enclosing loop agent to stop iterating.
    pub fn escalate(&self) {
        self.update(|actions| actions.escalate = true);
    }

    /// Make the function response the agent's final output for this turn.
    pub fn skip_summarization(&self) {
        self.update(|actions| actions.skip_summarization = true);
    }

    /// Record a session state write.
    pub fn set_state(&self, key: impl Into<String>, value: serde_json::Value) {
        let key = key.into();
        self.update(move |actions| {
            actions.state_delta.insert(key, value);
        });
    }

    /// Snapshot of the recorded actions.
    pub fn actions(&self) -> EventActions {
        match self.actions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut EventActions)) {
        match self.actions.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

/// Core tool trait. Implement to expose a capability to a model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &ToolParameters;

    /// How the tool is advertised to the model.
    fn declaration(&self) -> ToolDeclaration {
        ToolDeclaration::Function {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().schema.clone(),
        }
    }

    /// Execute the tool with parsed arguments.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AdkError>;
}

type ToolHandler = dyn Fn(
        ToolArguments,
        ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, AdkError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: ToolParameters,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, AdkError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolContext,
    ) -> Result<serde_json::Value, AdkError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
