//! Typed access to tool call arguments.

use crate::error::AdkError;

/// Wrapper around function-call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, AdkError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AdkError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an integer argument. Whole floats such as `20.0` are accepted,
    /// since models often emit JSON numbers with a fractional part.
    pub fn get_i64(&self, key: &str) -> Result<i64, AdkError> {
        self.value
            .get(key)
            .and_then(as_whole_number)
            .ok_or_else(|| AdkError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    /// Get a float argument.
    pub fn get_f64(&self, key: &str) -> Result<f64, AdkError> {
        self.value
            .get(key)
            .and_then(|v| v.as_f64())
            .ok_or_else(|| AdkError::InvalidArgument(format!("Missing number argument: {key}")))
    }

    /// Get an array argument.
    pub fn get_array(&self, key: &str) -> Result<&Vec<serde_json::Value>, AdkError> {
        self.value
            .get(key)
            .and_then(|v| v.as_array())
            .ok_or_else(|| AdkError::InvalidArgument(format!("Missing array argument: {key}")))
    }
}

/// Read a JSON number as an integer if it has no fractional part.
pub(crate) fn as_whole_number(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}
