//! Run event stream types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Content, FunctionCall, FunctionResponse, Usage};

/// Author name of events carrying the user's message.
pub const USER_AUTHOR: &str = "user";

/// Side effects attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventActions {
    /// Stop the enclosing loop agent.
    #[serde(default)]
    pub escalate: bool,
    /// The function response is the agent's final output for this turn.
    #[serde(default)]
    pub skip_summarization: bool,
    /// Session state writes applied when the event is appended.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub state_delta: HashMap<String, serde_json::Value>,
}

impl EventActions {
    pub fn merge(&mut self, other: EventActions) {
        self.escalate |= other.escalate;
        self.skip_summarization |= other.skip_summarization;
        self.state_delta.extend(other.state_delta);
    }

    pub fn is_empty(&self) -> bool {
        !self.escalate && !self.skip_summarization && self.state_delta.is_empty()
    }
}

/// One unit of a runner's response stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub invocation_id: String,
    /// Agent name, or `"user"`.
    pub author: String,
    /// Dotted agent path isolating parallel children's histories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default)]
    pub actions: EventActions,
    #[serde(default)]
    pub partial: bool,
    #[serde(default)]
    pub turn_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Token usage of the model call that produced this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            invocation_id: invocation_id.into(),
            author: author.into(),
            branch: None,
            content: None,
            actions: EventActions::default(),
            partial: false,
            turn_complete: false,
            error_message: None,
            usage: None,
            timestamp: Utc::now(),
        }
    }

    /// Event carrying the user's message.
    pub fn user(invocation_id: impl Into<String>, content: Content) -> Self {
        Self::new(invocation_id, USER_AUTHOR).with_content(content)
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_actions(mut self, actions: EventActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.content
            .as_ref()
            .map(|c| c.function_calls())
            .unwrap_or_default()
    }

    pub fn function_responses(&self) -> Vec<&FunctionResponse> {
        self.content
            .as_ref()
            .map(|c| c.function_responses())
            .unwrap_or_default()
    }

    /// Concatenated text parts, if any.
    pub fn text(&self) -> Option<String> {
        self.content
            .as_ref()
            .filter(|c| c.has_text())
            .map(|c| c.text())
    }

    /// Whether this event ends its author's turn from the user's view.
    pub fn is_final_response(&self) -> bool {
        if self.actions.skip_summarization {
            return true;
        }
        self.function_calls().is_empty() && self.function_responses().is_empty() && !self.partial
    }
}

/// Last event carrying content: the authoritative response of a run.
pub fn final_response(events: &[Event]) -> Option<&Event> {
    events.iter().rev().find(|e| e.content.is_some())
}

/// Text of the last event that has any.
pub fn final_text(events: &[Event]) -> Option<String> {
    events.iter().rev().find_map(Event::text)
}

/// Token usage summed over every model call in `events`.
pub fn total_usage(events: &[Event]) -> Usage {
    let mut total = Usage::default();
    for usage in events.iter().filter_map(|e| e.usage.as_ref()) {
        total.merge(usage);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Part, Role};
    use serde_json::json;

    fn call_event() -> Event {
        Event::new("e-1", "agent").with_content(Content::new(
            Role::Model,
            vec![Part::FunctionCall(FunctionCall {
                id: Some("c1".into()),
                name: "get_weather".into(),
                args: json!({"city": "New York"}),
            })],
        ))
    }

    #[test]
    fn text_reply_is_final() {
        let event = Event::new("e-1", "agent").with_content(Content::model("done"));

        assert!(event.is_final_response());
        assert_eq!(event.text().as_deref(), Some("done"));
    }

    #[test]
    fn function_call_is_not_final_unless_summarization_skipped() {
        let mut event = call_event();
        assert!(!event.is_final_response());

        event.actions.skip_summarization = true;
        assert!(event.is_final_response());
    }

    #[test]
    fn partial_event_is_not_final() {
        let mut event = Event::new("e-1", "agent").with_content(Content::model("par"));
        event.partial = true;

        assert!(!event.is_final_response());
    }

    #[test]
    fn merge_combines_flags_and_state() {
        let mut actions = EventActions::default();
        let mut other = EventActions {
            escalate: true,
            ..Default::default()
        };
        other.state_delta.insert("k".into(), json!("v"));

        actions.merge(other);

        assert!(actions.escalate);
        assert!(!actions.skip_summarization);
        assert_eq!(actions.state_delta["k"], json!("v"));
        assert!(!actions.is_empty());
    }

    #[test]
    fn final_helpers_pick_last_content() {
        let events = vec![
            Event::new("e-1", "a").with_content(Content::model("first")),
            call_event(),
            Event::new("e-1", "b"),
        ];

        assert_eq!(final_response(&events).map(|e| e.author.as_str()), Some("agent"));
        assert_eq!(final_text(&events).as_deref(), Some("first"));
        assert!(final_response(&[]).is_none());
    }

    #[test]
    fn total_usage_sums_model_events() {
        let usage = |input, output| Usage {
            input_tokens: input,
            output_tokens: output,
            total_tokens: input + output,
        };
        let events = vec![
            Event::user("e-1", Content::user("hi")),
            call_event().with_usage(usage(10, 4)),
            Event::new("e-1", "agent").with_content(Content::model("done")).with_usage(usage(20, 6)),
        ];

        let total = total_usage(&events);

        assert_eq!(total, usage(30, 10));
        assert_eq!(total_usage(&[]), Usage::default());
    }
}
