//! Structured success/error payload returned by domain tools.

use serde::{Deserialize, Serialize};

/// Outcome classification of a [`ToolResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// In-band tool outcome.
///
/// Expected domain failures (an unknown city, an invalid die) are reported
/// with [`ToolResult::error`] so the model can explain them to the user;
/// only unexpected faults surface as `Err` from `Tool::execute`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ToolResult {
    pub fn success(report: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Success,
            report: Some(report.into()),
            error_message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            report: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }
}

impl From<ToolResult> for serde_json::Value {
    fn from(result: ToolResult) -> Self {
        // A struct of strings always serializes.
        serde_json::to_value(result).unwrap_or_default()
    }
}
