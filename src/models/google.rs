//! Google Gemini model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Google Gemini models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
pub enum GoogleModel {
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-1.5-pro")]
    Gemini15Pro,
    #[strum(serialize = "gemini-1.5-flash")]
    Gemini15Flash,
    /// Custom/unknown Google model.
    #[strum(default)]
    Custom(String),
}

impl GoogleModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Custom(s) => s,
        }
    }

    /// Gemini 1.x models only understand the legacy search-retrieval tool.
    pub fn uses_legacy_search(&self) -> bool {
        match self {
            Self::Gemini15Pro | Self::Gemini15Flash => true,
            Self::Custom(s) => s.starts_with("gemini-1"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_known_model_names() {
        assert_eq!(
            GoogleModel::from_str("gemini-2.5-flash").unwrap(),
            GoogleModel::Gemini25Flash
        );
        assert_eq!(GoogleModel::Gemini25Flash.to_string(), "gemini-2.5-flash");
    }

    #[test]
    fn unknown_names_become_custom() {
        let model = GoogleModel::from_str("gemini-exp-1206").unwrap();

        assert_eq!(model, GoogleModel::Custom("gemini-exp-1206".into()));
        assert_eq!(model.as_str(), "gemini-exp-1206");
    }

    #[test]
    fn legacy_search_only_for_gemini_one() {
        assert!(GoogleModel::Gemini15Flash.uses_legacy_search());
        assert!(GoogleModel::Custom("gemini-1.0-pro".into()).uses_legacy_search());
        assert!(!GoogleModel::Gemini25Flash.uses_legacy_search());
    }
}
