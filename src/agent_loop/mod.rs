//! Agent loop primitives (events, invocation context, runner).

pub mod context;
pub mod events;
pub mod runner;

pub use context::InvocationContext;
pub use events::*;
pub use runner::*;
