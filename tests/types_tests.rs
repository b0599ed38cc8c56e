//! Tests for content types.

use pretty_assertions::assert_eq;
use serde_json::json;

use adk::types::*;

#[test]
fn user_content_shape() {
    let content = Content::user("What is the capital of France?");

    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!({"role": "user", "parts": [{"text": "What is the capital of France?"}]})
    );
}

#[test]
fn function_parts_use_camel_case_keys() {
    let content = Content::new(
        Role::Model,
        vec![
            Part::FunctionCall(FunctionCall {
                id: Some("call-1".into()),
                name: "roll_dice".into(),
                args: json!({"sides": 20}),
            }),
            Part::FunctionResponse(FunctionResponse {
                id: None,
                name: "roll_dice".into(),
                response: json!({"result": 13}),
            }),
        ],
    );

    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!({
            "role": "model",
            "parts": [
                {"functionCall": {"id": "call-1", "name": "roll_dice", "args": {"sides": 20}}},
                {"functionResponse": {"name": "roll_dice", "response": {"result": 13}}}
            ]
        })
    );
}

#[test]
fn content_deserializes_without_call_id_or_args() {
    let content: Content = serde_json::from_value(json!({
        "role": "model",
        "parts": [{"functionCall": {"name": "exit_loop"}}]
    }))
    .unwrap();

    let call = content.function_calls()[0];
    assert_eq!(call.id, None);
    assert!(call.args.is_null());
}

#[test]
fn text_helpers() {
    let content = Content::new(
        Role::Model,
        vec![Part::Text("Hello, ".into()), Part::Text("world".into())],
    );

    assert_eq!(content.text(), "Hello, world");
    assert!(content.has_text());
    assert!(content.function_calls().is_empty());
    assert!(!Content::new(Role::Model, vec![Part::Text(String::new())]).has_text());
}

#[test]
fn usage_merge_accumulates() {
    let mut total = Usage::default();
    total.merge(&Usage {
        input_tokens: 10,
        output_tokens: 5,
        total_tokens: 15,
    });
    total.merge(&Usage {
        input_tokens: 1,
        output_tokens: 2,
        total_tokens: 3,
    });

    assert_eq!(total.total_tokens, 18);
    assert_eq!(total.input_tokens, 11);
}

#[test]
fn generation_settings_builder() {
    let settings = GenerationSettings::builder()
        .temperature(0.0)
        .max_output_tokens(256)
        .build();

    assert_eq!(settings.max_output_tokens, Some(256));
    assert!(settings.top_p.is_none());
    assert!(!settings.is_empty());
}
