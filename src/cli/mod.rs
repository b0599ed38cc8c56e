//! CLI entry point for the demo agents.

pub mod demos;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_MODEL;

/// Run one of the bundled demo agents against Gemini.
#[derive(Parser, Debug)]
#[command(name = "adk", version, about = "adk: demo agents on Gemini")]
pub struct Cli {
    /// The Google Cloud project ID. Selects the Vertex AI backend.
    #[arg(long)]
    pub project: Option<String>,

    /// Vertex AI region. Falls back to GOOGLE_CLOUD_LOCATION, then us-central1.
    #[arg(long)]
    pub location: Option<String>,

    /// The Gemini model name.
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Demo to run
    #[arg(value_enum)]
    pub demo: Demo,
}

/// Bundled demos.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum Demo {
    /// Weather and time tools on one agent
    AgentWithTool,
    /// A summarizer agent exposed as a tool
    AgentAsTool,
    /// Google Search grounding
    GoogleSearchAgent,
    /// Temperature monitor in a loop
    LoopAgent,
    /// Search and weather agents side by side
    ParallelAgent,
    /// Dice roll, then prime check
    SequentialAgent,
}

impl Demo {
    pub const ALL: [Demo; 6] = [
        Demo::AgentWithTool,
        Demo::AgentAsTool,
        Demo::GoogleSearchAgent,
        Demo::LoopAgent,
        Demo::ParallelAgent,
        Demo::SequentialAgent,
    ];

    /// Application name the demo registers its session under.
    pub fn app_name(self) -> &'static str {
        match self {
            Demo::AgentWithTool => "agent_with_tool",
            Demo::AgentAsTool => "agent_as_tool",
            Demo::GoogleSearchAgent => "google_search_agent",
            Demo::LoopAgent => "loop_agent",
            Demo::ParallelAgent => "parallel_agent",
            Demo::SequentialAgent => "sequential_agent",
        }
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
