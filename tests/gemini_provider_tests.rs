//! Gemini request/response mapping against a mock HTTP server.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adk::agent::{Agent, LlmAgent};
use adk::agent_loop::{collect_events, final_text, Runner};
use adk::config::AdkConfig;
use adk::error::AdkError;
use adk::provider::{create_provider, LlmRequest, ModelProvider, ToolDeclaration};
use adk::session::{InMemorySessionService, SessionService};
use adk::tools::builtin::get_weather_tool;
use adk::tools::Tool;
use adk::types::*;

const FLASH_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn api_config(server: &MockServer) -> AdkConfig {
    AdkConfig::new()
        .with_api_key("test-key")
        .with_base_url(server.uri())
}

fn text_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16 }
    })
}

fn simple_request() -> LlmRequest {
    LlmRequest {
        system_instruction: Some("Be brief.".into()),
        contents: vec![Content::user("What is the capital of France?")],
        ..Default::default()
    }
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn gemini_api_text_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Paris.")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider("gemini-2.5-flash", &api_config(&server)).unwrap();
    let response = provider.generate_content(&simple_request()).await.unwrap();

    assert_eq!(response.content, Some(Content::model("Paris.")));
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    assert_eq!(response.usage.total_tokens, 16);

    let body = &sent_bodies(&server).await[0];
    assert_eq!(
        body["contents"],
        json!([{ "role": "user", "parts": [{ "text": "What is the capital of France?" }] }])
    );
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
    assert!(body.get("tools").is_none());
}

#[tokio::test]
async fn vertex_uses_project_path_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/projects/my-project/locations/europe-west4/publishers/google/models/gemini-2.5-flash:generateContent",
        ))
        .and(header("authorization", "Bearer vertex-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = AdkConfig::new()
        .with_project("my-project")
        .with_location("europe-west4")
        .with_access_token("vertex-token")
        .with_base_url(server.uri());
    let provider = create_provider("gemini-2.5-flash", &config).unwrap();

    let response = provider.generate_content(&simple_request()).await.unwrap();

    assert_eq!(response.content.unwrap().text(), "ok");
}

#[tokio::test]
async fn function_declarations_and_search_tools_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("done")))
        .mount(&server)
        .await;

    let request = LlmRequest {
        tools: vec![get_weather_tool().declaration(), ToolDeclaration::GoogleSearch],
        ..simple_request()
    };
    create_provider("gemini-2.5-flash", &api_config(&server))
        .unwrap()
        .generate_content(&request)
        .await
        .unwrap();
    create_provider("gemini-1.5-flash", &api_config(&server))
        .unwrap()
        .generate_content(&request)
        .await
        .unwrap();

    let bodies = sent_bodies(&server).await;
    let current = &bodies[0]["tools"];
    assert_eq!(current[0]["functionDeclarations"][0]["name"], "get_weather");
    assert_eq!(
        current[0]["functionDeclarations"][0]["parameters"]["required"],
        json!(["city"])
    );
    assert_eq!(current[1], json!({ "googleSearch": {} }));
    assert_eq!(bodies[1]["tools"][1], json!({ "googleSearchRetrieval": {} }));
}

#[tokio::test]
async fn function_call_response_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "thinking...", "thought": true },
                    { "functionCall": { "name": "get_weather", "args": { "city": "New York" } } }
                ]},
                "finishReason": "STOP"
            }]
        })))
        .mount(&server)
        .await;

    let provider = create_provider("gemini-2.5-flash", &api_config(&server)).unwrap();
    let response = provider.generate_content(&simple_request()).await.unwrap();

    let content = response.content.unwrap();
    assert_eq!(content.parts.len(), 1);
    let call = content.function_calls()[0];
    assert_eq!(call.name, "get_weather");
    assert_eq!(call.args, json!({ "city": "New York" }));
    assert!(call.id.as_deref().unwrap().starts_with("adk-"));
}

#[tokio::test]
async fn http_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource exhausted",
                "details": [{ "@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "17s" }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Internal error" }
        })))
        .mount(&server)
        .await;

    let config = api_config(&server);
    let call = |model: &'static str| {
        let config = config.clone();
        async move {
            create_provider(model, &config)
                .unwrap()
                .generate_content(&simple_request())
                .await
                .unwrap_err()
        }
    };

    assert!(matches!(
        call("gemini-2.5-pro").await,
        AdkError::RateLimited { retry_after_ms: Some(17_000) }
    ));
    assert!(matches!(call("gemini-2.0-flash").await, AdkError::Authentication(_)));
    match call("gemini-2.5-flash").await {
        AdkError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn agent_tool_loop_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "functionCall": { "name": "get_weather", "args": { "city": "New York" } } }
                ]},
                "finishReason": "STOP"
            }]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(FLASH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Sunny, 25 degrees.")))
        .mount(&server)
        .await;

    let model = create_provider("gemini-2.5-flash", &api_config(&server)).unwrap();
    let agent: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("weather_time_agent", model).with_tool(get_weather_tool()),
    );
    let sessions: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
    sessions
        .create_session("agent_with_tool", "user", Some("session"), None)
        .await
        .unwrap();
    let runner = Runner::new("agent_with_tool", agent, sessions).unwrap();

    let events = collect_events(runner.run(
        "user",
        "session",
        Content::user("What's the weather in New York?"),
    ))
    .await
    .unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(final_text(&events).as_deref(), Some("Sunny, 25 degrees."));

    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    let followup = bodies[1]["contents"].as_array().unwrap();
    assert_eq!(followup.len(), 3);
    assert_eq!(followup[1]["role"], "model");
    assert_eq!(followup[1]["parts"][0]["functionCall"]["name"], "get_weather");
    assert_eq!(followup[2]["role"], "user");
    assert_eq!(
        followup[2]["parts"][0]["functionResponse"]["response"]["status"],
        "success"
    );
}
