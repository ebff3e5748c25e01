//! Card-related types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of flashcard a draft describes.
///
/// Tags the model emits that are not recognized are kept as
/// [`CardType::Other`] so nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CardType {
    /// Plain question on the front, answer on the back.
    #[default]
    Basic,
    /// Question with a list of choices and one correct answer.
    MultipleChoice,
    /// Fill-in-the-blank text using `{{c1::...}}` deletions.
    Cloze,
    /// Statement to be judged true or false.
    TrueFalse,
    /// Any other tag.
    Other(String),
}

impl CardType {
    /// The tag used in JSON.
    pub fn as_str(&self) -> &str {
        match self {
            CardType::Basic => "basic",
            CardType::MultipleChoice => "multiple-choice",
            CardType::Cloze => "cloze",
            CardType::TrueFalse => "true-false",
            CardType::Other(tag) => tag.as_str(),
        }
    }

    /// Parse a tag, accepting the common spellings models produce.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().replace('_', "-").as_str() {
            "" | "basic" | "qa" | "q&a" | "question-answer" => CardType::Basic,
            "multiple-choice" | "multiplechoice" | "mcq" | "choice" => CardType::MultipleChoice,
            "cloze" | "cloze-deletion" => CardType::Cloze,
            "true-false" | "truefalse" | "boolean" => CardType::TrueFalse,
            _ => CardType::Other(tag.to_string()),
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CardType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CardType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(CardType::from_tag(&tag))
    }
}

/// Provenance recorded on every generated card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    /// When the card was produced.
    pub generated_at: DateTime<Utc>,
    /// Provider name, e.g. `deepseek`.
    pub provider: String,
    /// Model id used for the request.
    pub model: String,
    /// Sampling temperature used for the request.
    pub temperature: f32,
}

/// A flashcard produced from a model reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCard {
    /// Unique card id.
    pub id: String,
    /// The card kind.
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Front side text.
    pub front: String,
    /// Back side text.
    pub back: String,
    /// Choices for multiple-choice cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Correct answer marker: an index or the answer text, as the model gave it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<serde_json::Value>,
    /// Cloze text with deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloze_text: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image references.
    #[serde(default)]
    pub images: Vec<String>,
    /// Optional explanation of the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Generation provenance.
    pub metadata: CardMetadata,
}
