//! Generation settings and related enums.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    pub seed: Option<u64>,
}

impl GenerationSettings {
    /// Whether no setting is populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn builder_sets_only_requested_fields() {
        let settings = GenerationSettings::builder().temperature(0.2).build();

        assert_eq!(settings.temperature, Some(0.2));
        assert!(settings.max_output_tokens.is_none());
        assert!(!settings.is_empty());
        assert!(GenerationSettings::default().is_empty());
    }

    #[test]
    fn finish_reason_round_trips_through_strings() {
        assert_eq!(FinishReason::ContentFilter.to_string(), "content_filter");
        assert_eq!(FinishReason::from_str("tool_calls").unwrap(), FinishReason::ToolCalls);
    }
}
