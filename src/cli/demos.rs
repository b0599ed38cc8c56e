//! The six bundled demo agents.

use std::sync::Arc;

use super::Demo;
use crate::agent::{Agent, LlmAgent, LoopAgent, ParallelAgent, SequentialAgent};
use crate::agent_loop::{collect_events, total_usage, Event, Runner};
use crate::error::AdkError;
use crate::provider::ModelProvider;
use crate::session::{InMemorySessionService, SessionService};
use crate::tools::builtin::{
    check_prime_tool, get_current_time_tool, get_temperature_tool, get_weather_temperature_tool,
    get_weather_tool, notify_user_tool, roll_dice_tool, TEMPERATURE_READ_DELAY,
};
use crate::tools::{AgentTool, GoogleSearchTool};
use crate::types::Content;

use tracing::info;

pub const DEMO_USER_ID: &str = "user";
pub const DEMO_SESSION_ID: &str = "session";

/// Iteration cap of the temperature monitoring loop.
pub const LOOP_MAX_ITERATIONS: u32 = 5;

/// A ready-to-run demo: the agent tree and the question put to it.
pub struct DemoSpec {
    pub app_name: &'static str,
    pub question: &'static str,
    pub agent: Arc<dyn Agent>,
}

impl DemoSpec {
    pub fn user_line(&self) -> String {
        format!("User: {}", self.question)
    }
}

/// Build the agent tree of `demo` on top of `model`.
pub fn build_demo(demo: Demo, model: Arc<dyn ModelProvider>) -> DemoSpec {
    let (question, agent) = match demo {
        Demo::AgentWithTool => (
            "What's the weather in New York?",
            weather_time_agent(model),
        ),
        Demo::AgentAsTool => (
            "Compose a short story about a brave knight who must rescue a princess from a dragon. The story should be approximately 200 words and suitable for all ages.",
            summarizing_root_agent(model),
        ),
        Demo::GoogleSearchAgent => (
            "What is the capital of France?",
            google_search_root_agent(model),
        ),
        Demo::LoopAgent => (
            "Please monitor the temperature and notify me if it exceeds 35 degrees.",
            temperature_loop_agent(model),
        ),
        Demo::ParallelAgent => (
            "What's the weather in New York and what is the distance between Earth and Mars?",
            search_and_weather_agent(model),
        ),
        Demo::SequentialAgent => (
            "Please roll a d20 and check if the result is a prime.",
            dice_then_prime_agent(model),
        ),
    };
    DemoSpec {
        app_name: demo.app_name(),
        question,
        agent,
    }
}

fn weather_time_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("weather_time_agent", model)
            .with_description("Agent to answer questions about the time and weather in a city.")
            .with_instruction(
                "You are a helpful agent who can answer user questions about the time and weather in a city.",
            )
            .with_tools([get_weather_tool(), get_current_time_tool()]),
    )
}

fn summarizing_root_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    let summary_agent: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("summary_agent", model.clone())
            .with_description("Agent to summarize text")
            .with_instruction(
                "You are an expert summarizer. Please read the following text and provide a concise summary.",
            ),
    );
    Arc::new(
        LlmAgent::new("root_agent", model)
            .with_instruction(
                "You are a helpful assistant. When the user provides a text, use the 'summary_agent' tool to generate a summary. Always forward the user's message exactly as received to the 'summary_agent' tool, without modifying or summarizing it yourself. Present the response from the tool to the user.",
            )
            .with_tool(Arc::new(AgentTool::new(summary_agent).with_skip_summarization(true))),
    )
}

fn google_search_root_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("root_agent", model)
            .with_description(
                "an agent whose job it is to perform Google search queries and answer questions about the results.",
            )
            .with_instruction(
                "You are an agent whose job is to perform Google search queries and answer questions about the results.",
            )
            .with_tool(Arc::new(GoogleSearchTool::new())),
    )
}

fn temperature_loop_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    let description =
        "An agent that continuously monitors the temperature and alerts the user if temperature is too high.";
    let monitor: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("monitor_temperature_agent", model)
            .with_description(description)
            .with_instruction(
                "You are an agent that continuously monitors the temperature and alerts the user if the temperature is too high. Threshold is provided by the user.",
            )
            .with_tools([get_temperature_tool(TEMPERATURE_READ_DELAY), notify_user_tool()]),
    );
    Arc::new(
        LoopAgent::new("root_agent", vec![monitor])
            .with_description(description)
            .with_max_iterations(LOOP_MAX_ITERATIONS),
    )
}

fn search_and_weather_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    let search: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("google_search_agent", model.clone())
            .with_description(
                "An agent whose job it is to perform Google search queries and answer questions about the results.",
            )
            .with_instruction(
                "You are an agent whose job is to perform Google search query and return summary for the result maximum containing 300 characters.",
            )
            .with_tool(Arc::new(GoogleSearchTool::new())),
    );
    let weather: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("get_weather_agent", model)
            .with_description("Retrieves the current weather report for a specified city.")
            .with_instruction(
                "You are responsible for retrieving the current weather temperature for a city from the user request. You should not ask for additional information.",
            )
            .with_tool(get_weather_temperature_tool()),
    );
    Arc::new(
        ParallelAgent::new("parallel_agent", vec![search, weather])
            .with_description("A parallel agent that runs multiple sub-agents in parallel."),
    )
}

fn dice_then_prime_agent(model: Arc<dyn ModelProvider>) -> Arc<dyn Agent> {
    let roll: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("roll_agent", model.clone())
            .with_description("Handles rolling dice of different sizes.")
            .with_instruction(
                "You are responsible for rolling dice based on the user's request. When asked to roll a dice, you must call the roll_dice tool with the number of sides as an integer.",
            )
            .with_tool(roll_dice_tool()),
    );
    let prime: Arc<dyn Agent> = Arc::new(
        LlmAgent::new("prime_agent", model)
            .with_description("Handles checking if numbers are prime.")
            .with_instruction(
                "You are responsible for checking whether numbers are prime. When asked to check primes, you must call the check_prime tool with a list of integers. Never attempt to determine prime numbers manually. Return the prime number results to the root agent.",
            )
            .with_tool(check_prime_tool()),
    );
    Arc::new(SequentialAgent::new("simple_sequential_agent", vec![roll, prime]))
}

/// Run a demo in a fresh in-memory session and return every event.
pub async fn run_demo(spec: &DemoSpec) -> Result<Vec<Event>, AdkError> {
    let sessions: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
    sessions
        .create_session(spec.app_name, DEMO_USER_ID, Some(DEMO_SESSION_ID), None)
        .await?;
    let runner = Runner::new(spec.app_name, spec.agent.clone(), sessions)?;

    let events =
        collect_events(runner.run(DEMO_USER_ID, DEMO_SESSION_ID, Content::user(spec.question))).await?;
    let usage = total_usage(&events);
    info!(
        app = spec.app_name,
        events = events.len(),
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        total_tokens = usage.total_tokens,
        "demo finished"
    );
    Ok(events)
}

/// `Agent: <pretty JSON>` line for the content of the last event
/// (`null` when it has none or there were no events).
pub fn agent_line(events: &[Event]) -> Result<String, AdkError> {
    let content = events.last().and_then(|e| e.content.as_ref());
    Ok(format!("Agent: {}", serde_json::to_string_pretty(&content)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Part, Role};

    #[test]
    fn agent_line_pretty_prints_last_content() {
        let events = vec![
            Event::user("e-1", Content::user("hi")),
            Event::new("e-1", "agent").with_content(Content::new(Role::Model, vec![Part::Text("hello".into())])),
        ];

        let line = agent_line(&events).unwrap();

        assert_eq!(
            line,
            "Agent: {\n  \"role\": \"model\",\n  \"parts\": [\n    {\n      \"text\": \"hello\"\n    }\n  ]\n}"
        );
    }

    #[test]
    fn agent_line_without_content_is_null() {
        assert_eq!(agent_line(&[]).unwrap(), "Agent: null");
        assert_eq!(
            agent_line(&[Event::new("e-1", "agent")]).unwrap(),
            "Agent: null"
        );
    }
}
