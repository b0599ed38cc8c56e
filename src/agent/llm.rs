//! Model-backed agent running the function-calling loop.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::{event_stream, Agent, EventStream};
use crate::agent_loop::context::InvocationContext;
use crate::agent_loop::events::{Event, EventActions, USER_AUTHOR};
use crate::error::AdkError;
use crate::provider::{LlmRequest, ModelProvider};
use crate::tools::{validate_arguments, Tool, ToolArguments, ToolContext};
use crate::types::{Content, FunctionCall, FunctionResponse, GenerationSettings, Part, Role};

/// Model calls allowed per invocation before the agent gives up.
pub const DEFAULT_MAX_MODEL_CALLS: usize = 20;

/// Agent that asks a model what to do and executes the tools it calls.
pub struct LlmAgent {
    name: String,
    description: String,
    instruction: Option<String>,
    model: Arc<dyn ModelProvider>,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
    output_key: Option<String>,
    max_model_calls: usize,
}

impl LlmAgent {
    pub fn new(name: impl Into<String>, model: Arc<dyn ModelProvider>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            instruction: None,
            model,
            tools: Vec::new(),
            settings: GenerationSettings::default(),
            output_key: None,
            max_model_calls: DEFAULT_MAX_MODEL_CALLS,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Store the final text reply in session state under `key`.
    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn with_max_model_calls(mut self, max: usize) -> Self {
        self.max_model_calls = max;
        self
    }

    pub fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }

    pub fn model(&self) -> &Arc<dyn ModelProvider> {
        &self.model
    }

    fn system_instruction(&self) -> String {
        let mut text = String::new();
        if let Some(instruction) = &self.instruction {
            text.push_str(instruction);
            text.push_str("\n\n");
        }
        text.push_str(&format!(
            "You are an agent. Your internal name is \"{}\".",
            self.name
        ));
        if !self.description.is_empty() {
            text.push_str(&format!(
                " The description about you is \"{}\".",
                self.description
            ));
        }
        text
    }

    /// Model request for the current point of the conversation.
    pub fn build_request(&self, history: &[Event]) -> LlmRequest {
        LlmRequest {
            system_instruction: Some(self.system_instruction()),
            contents: build_contents(history, &self.name),
            tools: self.tools.iter().map(|t| t.declaration()).collect(),
            settings: self.settings.clone(),
        }
    }

    async fn execute_calls(
        &self,
        ctx: &InvocationContext,
        calls: &[FunctionCall],
    ) -> (Vec<Part>, EventActions) {
        let outcomes = join_all(calls.iter().map(|call| self.execute_call(ctx, call))).await;

        let mut parts = Vec::with_capacity(outcomes.len());
        let mut actions = EventActions::default();
        for (response, call_actions) in outcomes {
            parts.push(Part::FunctionResponse(response));
            actions.merge(call_actions);
        }
        (parts, actions)
    }

    async fn execute_call(
        &self,
        ctx: &InvocationContext,
        call: &FunctionCall,
    ) -> (FunctionResponse, EventActions) {
        let tool_ctx = ToolContext::new(
            &ctx.invocation_id,
            &self.name,
            call.id.clone(),
            ctx.session.clone(),
        );

        let response = match self.tools.iter().find(|t| t.name() == call.name) {
            None => {
                warn!(agent = %self.name, tool = %call.name, "Tool not found");
                serde_json::json!({ "error": format!("Tool '{}' not found", call.name) })
            }
            Some(tool) => match validate_arguments(&call.args, &tool.parameters().schema) {
                Err(message) => {
                    warn!(agent = %self.name, tool = %call.name, %message, "Invalid tool arguments");
                    serde_json::json!({
                        "error": format!("Invalid arguments for tool '{}': {message}", call.name)
                    })
                }
                Ok(()) => {
                    let args = ToolArguments::new(call.args.clone());
                    match tool.execute(&args, &tool_ctx).await {
                        Ok(value) if value.is_object() => value,
                        Ok(value) => serde_json::json!({ "result": value }),
                        Err(e) => {
                            warn!(agent = %self.name, tool = %call.name, error = %e, "Tool execution failed");
                            serde_json::json!({ "error": e.to_string() })
                        }
                    }
                }
            },
        };

        (
            FunctionResponse {
                id: call.id.clone(),
                name: call.name.clone(),
                response,
            },
            tool_ctx.actions(),
        )
    }
}

impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    fn run(self: Arc<Self>, ctx: InvocationContext) -> EventStream {
        event_stream(async_stream::try_stream! {
            for call_index in 0..self.max_model_calls {
                let history = ctx.visible_events().await?;
                let request = self.build_request(&history);
                debug!(
                    agent = %self.name,
                    model = %self.model.model_id(),
                    call_index,
                    contents = request.contents.len(),
                    "calling model"
                );
                let response = self.model.generate_content(&request).await?;
                let usage = response.usage;

                let Some(content) = response.content.filter(|c| !c.parts.is_empty()) else {
                    debug!(agent = %self.name, finish_reason = ?response.finish_reason, "model returned no content");
                    let mut event = ctx.new_event(&self.name).with_usage(usage);
                    event.turn_complete = true;
                    yield event;
                    return;
                };

                let calls: Vec<FunctionCall> = content.function_calls().into_iter().cloned().collect();
                if calls.is_empty() {
                    let mut event = ctx.new_event(&self.name).with_usage(usage);
                    if let Some(key) = &self.output_key {
                        event
                            .actions
                            .state_delta
                            .insert(key.clone(), serde_json::Value::String(content.text()));
                    }
                    event.turn_complete = true;
                    yield event.with_content(content);
                    return;
                }

                yield ctx.new_event(&self.name).with_content(content).with_usage(usage);

                let (parts, actions) = self.execute_calls(&ctx, &calls).await;
                let stop = actions.skip_summarization;
                yield ctx
                    .new_event(&self.name)
                    .with_content(Content::new(Role::User, parts))
                    .with_actions(actions);
                if stop {
                    return;
                }
            }

            warn!(agent = %self.name, max = self.max_model_calls, "model call limit reached");
            yield ctx.new_event(&self.name).with_error_message(format!(
                "Exceeded maximum of {} model calls",
                self.max_model_calls
            ));
        })
    }
}

impl std::fmt::Debug for LlmAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmAgent")
            .field("name", &self.name)
            .field("model", &self.model.model_id())
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Turn session history into model contents from `agent_name`'s point of
/// view: its own messages keep their role, other agents' messages become
/// user-role context.
pub fn build_contents(history: &[Event], agent_name: &str) -> Vec<Content> {
    history
        .iter()
        .filter_map(|event| {
            let content = event.content.as_ref().filter(|c| !c.parts.is_empty())?;
            if event.author == USER_AUTHOR || event.author == agent_name {
                Some(content.clone())
            } else {
                Some(foreign_context(&event.author, content))
            }
        })
        .collect()
}

fn foreign_context(author: &str, content: &Content) -> Content {
    let mut parts = vec![Part::Text("For context:".to_string())];
    for part in &content.parts {
        let text = match part {
            Part::Text(text) => format!("[{author}] said: {text}"),
            Part::FunctionCall(call) => format!(
                "[{author}] called tool `{}` with parameters: {}",
                call.name, call.args
            ),
            Part::FunctionResponse(resp) => format!(
                "[{author}] `{}` tool returned result: {}",
                resp.name, resp.response
            ),
        };
        parts.push(Part::Text(text));
    }
    Content::new(Role::User, parts)
}
