//! Model provider trait and the Gemini implementation.

pub mod google;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AdkConfig;
use crate::error::AdkError;
use crate::models::GoogleModel;
use crate::types::{Content, FinishReason, GenerationSettings, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone, Default)]
pub struct LlmRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Content>,
    pub tools: Vec<ToolDeclaration>,
    pub settings: GenerationSettings,
}

/// How a tool is advertised to the model.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolDeclaration {
    /// A locally executed function with a JSON Schema.
    Function {
        name: String,
        description: String,
        parameters: serde_json::Value,
    },
    /// The model-side Google Search grounding tool.
    GoogleSearch,
}

impl ToolDeclaration {
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Function { name, .. } => Some(name),
            Self::GoogleSearch => None,
        }
    }
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// `None` when the model returned no candidate content.
    pub content: Option<Content>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model backends.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate one model turn.
    async fn generate_content(&self, request: &LlmRequest) -> Result<LlmResponse, AdkError>;
}

/// Create a Gemini provider for the given model name, using the provided config.
pub fn create_provider(
    model: &str,
    config: &AdkConfig,
) -> Result<Arc<dyn ModelProvider>, AdkError> {
    let model: GoogleModel = model
        .parse()
        .map_err(|_| AdkError::ModelNotFound(model.to_string()))?;
    let backend = google::GoogleBackend::from_config(config)?;
    Ok(Arc::new(google::GoogleProvider::new(model, backend)))
}
