//! adk: a small agent development kit on Gemini.
//!
//! Agents (model-backed, sequential, parallel and loop) run tools against
//! an in-memory session store; a [`agent_loop::Runner`] turns a user
//! message into a lazy stream of events.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use adk::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example() -> adk::error::Result<()> {
//! let model = adk::provider::create_provider("gemini-2.5-flash", &AdkConfig::from_env())?;
//! let agent: Arc<dyn Agent> = Arc::new(
//!     LlmAgent::new("weather_agent", model).with_tool(adk::tools::builtin::get_weather_tool()),
//! );
//!
//! let sessions: Arc<dyn SessionService> = Arc::new(InMemorySessionService::new());
//! sessions.create_session("app", "user", Some("session"), None).await?;
//! let runner = Runner::new("app", agent, sessions)?;
//!
//! let mut events = runner.run("user", "session", Content::user("Weather in New York?"));
//! while let Some(event) = events.next().await {
//!     println!("{:?}", event?.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod agent_loop;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
