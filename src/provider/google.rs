//! Google Gemini provider (Gemini API and Vertex AI).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::AdkConfig;
use crate::error::AdkError;
use crate::models::GoogleModel;
use crate::types::*;

use super::http::{shared_client, status_to_error};
use super::{LlmRequest, LlmResponse, ModelProvider, ToolDeclaration};

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Where Gemini requests are sent and how they authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum GoogleBackend {
    /// Gemini Developer API, authenticated with an API key.
    GeminiApi {
        api_key: String,
        base_url: Option<String>,
    },
    /// Vertex AI, authenticated with an OAuth access token.
    VertexAi {
        project: String,
        location: String,
        access_token: String,
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for GoogleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GeminiApi { base_url, .. } => f
                .debug_struct("GeminiApi")
                .field("base_url", base_url)
                .finish_non_exhaustive(),
            Self::VertexAi {
                project,
                location,
                base_url,
                ..
            } => f
                .debug_struct("VertexAi")
                .field("project", project)
                .field("location", location)
                .field("base_url", base_url)
                .finish_non_exhaustive(),
        }
    }
}

impl GoogleBackend {
    /// Pick the backend described by `config`.
    pub fn from_config(config: &AdkConfig) -> Result<Self, AdkError> {
        let base_url = config.base_url().map(str::to_string);
        if config.uses_vertex() {
            let project = config
                .project()
                .ok_or_else(|| AdkError::Configuration("Missing GOOGLE_CLOUD_PROJECT".into()))?;
            let access_token = config.access_token().ok_or_else(|| {
                AdkError::Authentication(
                    "Missing GOOGLE_CLOUD_ACCESS_TOKEN (see `gcloud auth print-access-token`)"
                        .into(),
                )
            })?;
            return Ok(Self::VertexAi {
                project: project.to_string(),
                location: config.location().to_string(),
                access_token: access_token.to_string(),
                base_url,
            });
        }

        let api_key = config
            .api_key()
            .ok_or_else(|| AdkError::Authentication("Missing GOOGLE_API_KEY".into()))?;
        Ok(Self::GeminiApi {
            api_key: api_key.to_string(),
            base_url,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        match self {
            Self::GeminiApi { base_url, .. } => format!(
                "{}/models/{model}:generateContent",
                base_url.as_deref().unwrap_or(GEMINI_API_BASE_URL)
            ),
            Self::VertexAi {
                project,
                location,
                base_url,
                ..
            } => {
                let base = base_url
                    .clone()
                    .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com/v1"));
                format!(
                    "{base}/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent"
                )
            }
        }
    }
}

pub struct GoogleProvider {
    model: GoogleModel,
    backend: GoogleBackend,
}

impl GoogleProvider {
    pub fn new(model: GoogleModel, backend: GoogleBackend) -> Self {
        Self { model, backend }
    }

    pub fn backend(&self) -> &GoogleBackend {
        &self.backend
    }

    fn build_request_body(&self, request: &LlmRequest) -> Value {
        let contents: Vec<Value> = request
            .contents
            .iter()
            .map(|content| {
                json!({
                    "role": match content.role {
                        Role::User => "user",
                        Role::Model => "model",
                    },
                    "parts": build_gemini_parts(&content.parts),
                })
            })
            .collect();

        let mut body = Map::new();
        body.insert("contents".into(), Value::Array(contents));

        if let Some(ref sys) = request.system_instruction {
            if !sys.is_empty() {
                body.insert(
                    "systemInstruction".into(),
                    json!({ "parts": [{ "text": sys }] }),
                );
            }
        }

        let mut gen_config = Map::new();
        let settings = &request.settings;
        if let Some(max) = settings.max_output_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = settings.top_p {
            gen_config.insert("topP".into(), top_p.into());
        }
        if let Some(top_k) = settings.top_k {
            gen_config.insert("topK".into(), top_k.into());
        }
        if let Some(ref stops) = settings.stop_sequences {
            gen_config.insert("stopSequences".into(), json!(stops));
        }
        if let Some(seed) = settings.seed {
            gen_config.insert("seed".into(), seed.into());
        }
        if !gen_config.is_empty() {
            body.insert("generationConfig".into(), Value::Object(gen_config));
        }

        let tools = self.build_tools(&request.tools);
        if !tools.is_empty() {
            body.insert("tools".into(), Value::Array(tools));
        }

        Value::Object(body)
    }

    fn build_tools(&self, declarations: &[ToolDeclaration]) -> Vec<Value> {
        let mut tools = Vec::new();
        let fn_decls: Vec<Value> = declarations
            .iter()
            .filter_map(|decl| match decl {
                ToolDeclaration::Function {
                    name,
                    description,
                    parameters,
                } => Some(json!({
                    "name": name,
                    "description": description,
                    "parameters": parameters,
                })),
                ToolDeclaration::GoogleSearch => None,
            })
            .collect();
        if !fn_decls.is_empty() {
            tools.push(json!({ "functionDeclarations": fn_decls }));
        }
        if declarations.contains(&ToolDeclaration::GoogleSearch) {
            if self.model.uses_legacy_search() {
                tools.push(json!({ "googleSearchRetrieval": {} }));
            } else {
                tools.push(json!({ "googleSearch": {} }));
            }
        }
        tools
    }
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate_content(&self, request: &LlmRequest) -> Result<LlmResponse, AdkError> {
        let body = self.build_request_body(request);
        let url = self.backend.endpoint(self.model.as_str());

        debug!(
            model = self.model.as_str(),
            contents = request.contents.len(),
            tools = request.tools.len(),
            "Google generate_content"
        );

        let builder = shared_client().post(&url).json(&body);
        let builder = match &self.backend {
            GoogleBackend::GeminiApi { api_key, .. } => builder.header("x-goog-api-key", api_key),
            GoogleBackend::VertexAi { access_token, .. } => builder.bearer_auth(access_token),
        };
        let resp = builder.send().await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: GeminiResponse = resp.json().await?;
        parse_response(data)
    }
}

fn build_gemini_parts(parts: &[Part]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => json!({ "text": text }),
            Part::FunctionCall(call) => {
                let mut fc = Map::new();
                if let Some(id) = &call.id {
                    fc.insert("id".into(), id.clone().into());
                }
                fc.insert("name".into(), call.name.clone().into());
                let args = if call.args.is_null() { json!({}) } else { call.args.clone() };
                fc.insert("args".into(), args);
                json!({ "functionCall": fc })
            }
            Part::FunctionResponse(resp) => {
                let mut fr = Map::new();
                if let Some(id) = &resp.id {
                    fr.insert("id".into(), id.clone().into());
                }
                fr.insert("name".into(), resp.name.clone().into());
                fr.insert("response".into(), resp.response.clone());
                json!({ "functionResponse": fr })
            }
        })
        .collect()
}

fn parse_response(data: GeminiResponse) -> Result<LlmResponse, AdkError> {
    let usage = data
        .usage_metadata
        .map(|u| Usage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        })
        .unwrap_or_default();

    let Some(candidate) = data.candidates.into_iter().next() else {
        if let Some(reason) = data.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AdkError::api(200, format!("Prompt blocked: {reason}")));
        }
        return Err(AdkError::api(200, "No candidates in Gemini response"));
    };

    let finish_reason = candidate.finish_reason.as_deref().and_then(map_finish_reason);

    let mut parts = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if part.thought.unwrap_or(false) {
            continue;
        }
        if let Some(text) = part.text {
            parts.push(Part::Text(text));
        }
        if let Some(fc) = part.function_call {
            parts.push(Part::FunctionCall(FunctionCall {
                id: Some(fc.id.unwrap_or_else(|| format!("adk-{}", uuid::Uuid::new_v4()))),
                name: fc.name,
                args: fc.args.unwrap_or_else(|| Value::Object(Map::new())),
            }));
        }
    }

    let content = if parts.is_empty() {
        None
    } else {
        Some(Content::new(Role::Model, parts))
    };

    Ok(LlmResponse {
        content,
        usage,
        finish_reason,
    })
}

fn map_finish_reason(reason: &str) -> Option<FinishReason> {
    match reason {
        "STOP" => Some(FinishReason::Stop),
        "MAX_TOKENS" => Some(FinishReason::Length),
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
            Some(FinishReason::ContentFilter)
        }
        "MALFORMED_FUNCTION_CALL" => Some(FinishReason::Error),
        _ => None,
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
    thought: Option<bool>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    id: Option<String>,
    name: String,
    args: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini_api() -> GoogleBackend {
        GoogleBackend::GeminiApi {
            api_key: "key".into(),
            base_url: None,
        }
    }

    #[test]
    fn gemini_api_endpoint() {
        assert_eq!(
            gemini_api().endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn vertex_endpoint_embeds_project_and_location() {
        let backend = GoogleBackend::VertexAi {
            project: "proj".into(),
            location: "us-central1".into(),
            access_token: "token".into(),
            base_url: None,
        };

        assert_eq!(
            backend.endpoint("gemini-2.5-flash"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/proj/locations/us-central1/publishers/google/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn vertex_without_token_is_an_auth_error() {
        let config = AdkConfig::new().with_project("proj");

        let err = GoogleBackend::from_config(&config).unwrap_err();

        assert!(matches!(err, AdkError::Authentication(_)));
    }

    #[test]
    fn debug_hides_credentials() {
        let rendered = format!("{:?}", gemini_api());
        assert!(!rendered.contains("key\""));
    }

    #[test]
    fn request_body_maps_roles_tools_and_settings() {
        let provider = GoogleProvider::new(GoogleModel::Gemini25Flash, gemini_api());
        let request = LlmRequest {
            system_instruction: Some("be brief".into()),
            contents: vec![
                Content::user("hi"),
                Content::new(
                    Role::Model,
                    vec![Part::FunctionCall(FunctionCall {
                        id: Some("call-1".into()),
                        name: "roll_dice".into(),
                        args: Value::Null,
                    })],
                ),
            ],
            tools: vec![
                ToolDeclaration::Function {
                    name: "roll_dice".into(),
                    description: "Roll a die".into(),
                    parameters: json!({"type": "object"}),
                },
                ToolDeclaration::GoogleSearch,
            ],
            settings: GenerationSettings::builder().temperature(0.5).build(),
        };

        let body = provider.build_request_body(&request);

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["functionCall"]["args"], json!({}));
        assert_eq!(body["contents"][1]["parts"][0]["functionCall"]["id"], "call-1");
        assert_eq!(
            body["tools"][0]["functionDeclarations"][0]["name"],
            "roll_dice"
        );
        assert_eq!(body["tools"][1], json!({"googleSearch": {}}));
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn call_ids_pair_repeated_calls_with_their_responses() {
        let call = |id: &str, city: &str| {
            Part::FunctionCall(FunctionCall {
                id: Some(id.into()),
                name: "get_weather".into(),
                args: json!({ "city": city }),
            })
        };
        let response = |id: Option<&str>| {
            Part::FunctionResponse(FunctionResponse {
                id: id.map(str::to_string),
                name: "get_weather".into(),
                response: json!({ "status": "success" }),
            })
        };

        let parts = build_gemini_parts(&[
            call("call-a", "New York"),
            call("call-b", "Paris"),
            response(Some("call-b")),
            response(None),
        ]);

        assert_eq!(parts[0]["functionCall"]["id"], "call-a");
        assert_eq!(parts[1]["functionCall"]["id"], "call-b");
        assert_eq!(parts[2]["functionResponse"]["id"], "call-b");
        assert!(parts[3]["functionResponse"].get("id").is_none());
    }

    #[test]
    fn legacy_models_get_search_retrieval() {
        let provider = GoogleProvider::new(GoogleModel::Gemini15Flash, gemini_api());

        let tools = provider.build_tools(&[ToolDeclaration::GoogleSearch]);

        assert_eq!(tools, vec![json!({"googleSearchRetrieval": {}})]);
    }

    #[test]
    fn parse_response_skips_thoughts_and_assigns_call_ids() {
        let data: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"functionCall": {"name": "get_weather", "args": {"city": "New York"}}}
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "totalTokenCount": 3}
        }))
        .unwrap();

        let response = parse_response(data).unwrap();
        let content = response.content.unwrap();

        assert_eq!(content.parts.len(), 1);
        let call = content.function_calls()[0];
        assert_eq!(call.name, "get_weather");
        assert!(call.id.as_deref().unwrap().starts_with("adk-"));
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.input_tokens, 3);
        assert_eq!(response.usage.output_tokens, 0);
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let data: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let err = parse_response(data).unwrap_err();

        assert!(err.to_string().contains("Prompt blocked: SAFETY"));
    }
}
