//! Per-call generation settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selects which prompt the [`PromptBuilder`](crate::PromptBuilder) produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptTemplate {
    /// Question/answer cards only.
    #[default]
    Basic,
    /// Cloze deletion cards only.
    Cloze,
    /// Multiple-choice cards only.
    MultipleChoice,
    /// Let the model choose a mix of card types.
    Mixed,
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptTemplate::Basic => "basic",
            PromptTemplate::Cloze => "cloze",
            PromptTemplate::MultipleChoice => "multiple-choice",
            PromptTemplate::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

impl FromStr for PromptTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(PromptTemplate::Basic),
            "cloze" => Ok(PromptTemplate::Cloze),
            "multiple-choice" | "mcq" => Ok(PromptTemplate::MultipleChoice),
            "mixed" => Ok(PromptTemplate::Mixed),
            _ => Err(format!(
                "Invalid template: {}. Use 'basic', 'cloze', 'multiple-choice' or 'mixed'",
                s
            )),
        }
    }
}

/// Settings for one generation call.
///
/// # Example
///
/// ```
/// use flashgen::{GenerationConfig, PromptTemplate};
///
/// let config = GenerationConfig {
///     card_count: 10,
///     template: PromptTemplate::Cloze,
///     ..Default::default()
/// };
/// assert_eq!(config.max_tokens, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// How many cards to ask the model for.
    pub card_count: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token budget.
    pub max_tokens: u32,
    /// Prompt template selector.
    #[serde(default)]
    pub template: PromptTemplate,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            card_count: 5,
            temperature: 0.7,
            max_tokens: 2000,
            template: PromptTemplate::Basic,
        }
    }
}
