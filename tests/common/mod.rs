//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use adk::agent_loop::Event;
use adk::error::AdkError;
use adk::provider::{LlmRequest, LlmResponse, ModelProvider};
use adk::session::{InMemorySessionService, SessionService};
use adk::types::*;

type Handler = dyn Fn(&LlmRequest) -> Result<LlmResponse, AdkError> + Send + Sync;

/// A mock provider answering through a handler and recording every request.
pub struct MockProvider {
    model_id: String,
    handler: Box<Handler>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    /// Answer each request with `handler`.
    pub fn scripted(
        handler: impl Fn(&LlmRequest) -> Result<LlmResponse, AdkError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            model_id: "mock-model".to_string(),
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer requests with `responses` in order, then with "Mock response".
    pub fn queued(responses: Vec<LlmResponse>) -> Self {
        let queue = Mutex::new(VecDeque::from(responses));
        Self::scripted(move |_| {
            Ok(queue
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| text_response("Mock response")))
        })
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_content(&self, request: &LlmRequest) -> Result<LlmResponse, AdkError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

/// A text-only model turn.
pub fn text_response(text: &str) -> LlmResponse {
    LlmResponse {
        content: Some(Content::model(text)),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 20,
            total_tokens: 30,
        },
        finish_reason: Some(FinishReason::Stop),
    }
}

/// A model turn requesting one function call.
pub fn call_response(name: &str, args: serde_json::Value) -> LlmResponse {
    LlmResponse {
        content: Some(Content::new(
            Role::Model,
            vec![Part::FunctionCall(FunctionCall {
                id: Some(format!("call-{name}")),
                name: name.to_string(),
                args,
            })],
        )),
        usage: Usage::default(),
        finish_reason: Some(FinishReason::Stop),
    }
}

/// Name of the agent that sent `request`, read from its system instruction.
pub fn agent_of(request: &LlmRequest) -> String {
    let instruction = request.system_instruction.as_deref().unwrap_or_default();
    instruction
        .split("Your internal name is \"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap_or_default()
        .to_string()
}

/// Whether the last content of `request` is a function response.
pub fn answers_function_call(request: &LlmRequest) -> bool {
    request
        .contents
        .last()
        .is_some_and(|c| !c.function_responses().is_empty())
}

/// Function response payloads visible in `request`, oldest first.
pub fn function_responses(request: &LlmRequest) -> Vec<FunctionResponse> {
    request
        .contents
        .iter()
        .flat_map(|c| c.function_responses().into_iter().cloned())
        .collect()
}

/// A session service holding the session `app/user/session`.
pub async fn session_service(app_name: &str) -> Arc<dyn SessionService> {
    let sessions: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
    sessions
        .create_session(app_name, "user", Some("session"), None)
        .await
        .unwrap();
    sessions
}

pub fn authors(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.author.as_str()).collect()
}
