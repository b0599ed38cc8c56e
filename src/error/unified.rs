//! Broad error classification.

/// Broad error category, used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Serialization,
    ToolExecution,
    Session,
    Unknown,
}

impl ErrorCategory {
    /// Short label shown in brackets by the CLI when a run fails.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimit => "rate limit",
            Self::Network => "network",
            Self::Server => "server",
            Self::Api => "api",
            Self::Configuration => "configuration",
            Self::Serialization => "serialization",
            Self::ToolExecution => "tool",
            Self::Session => "session",
            Self::Unknown => "unknown",
        }
    }
}
