//! Prompt construction.
//!
//! Providers do not build prompts themselves; they are handed a
//! [`PromptBuilder`]. [`StandardPrompts`] asks the model for a JSON array of
//! card objects, which is what [`JsonCardParser`](crate::JsonCardParser)
//! expects back.

use crate::types::{GenerationConfig, PromptTemplate};

/// A system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Turns source text and settings into a prompt pair.
pub trait PromptBuilder: Send + Sync {
    fn build(&self, content: &str, config: &GenerationConfig) -> Prompt;
}

/// The default prompt builder.
#[derive(Debug, Clone, Default)]
pub struct StandardPrompts;

const OUTPUT_FORMAT: &str = r#"Respond with a JSON array only, no prose. Each element is an object:
{
  "type": "basic" | "multiple-choice" | "cloze" | "true-false",
  "front": "question or prompt side",
  "back": "answer side",
  "choices": ["only for multiple-choice"],
  "correctAnswer": "index or text of the correct choice",
  "clozeText": "only for cloze, using {{c1::hidden}} deletions",
  "tags": ["short", "topic", "tags"],
  "explanation": "optional one-sentence explanation"
}"#;

impl StandardPrompts {
    fn card_rules(template: PromptTemplate) -> &'static str {
        match template {
            PromptTemplate::Basic => {
                "Create question/answer cards (type \"basic\"). Each front asks one clear question; each back answers it concisely."
            }
            PromptTemplate::Cloze => {
                "Create cloze deletion cards (type \"cloze\"). Put the sentence with {{c1::...}} deletions in clozeText, repeat it in front, and put the hidden terms in back."
            }
            PromptTemplate::MultipleChoice => {
                "Create multiple-choice cards (type \"multiple-choice\") with exactly four choices, one correct, and correctAnswer set to the zero-based index of the correct choice."
            }
            PromptTemplate::Mixed => {
                "Create a mix of basic, cloze and multiple-choice cards, choosing whichever type best fits each fact."
            }
        }
    }
}

impl PromptBuilder for StandardPrompts {
    fn build(&self, content: &str, config: &GenerationConfig) -> Prompt {
        let system = format!(
            "You are an expert educator who writes effective spaced-repetition flashcards. \
             Every card tests a single atomic fact taken from the material.\n\n{}\n\n{}",
            Self::card_rules(config.template),
            OUTPUT_FORMAT
        );
        let user = format!(
            "Create {} flashcards from the following material:\n\n{}",
            config.card_count,
            content.trim()
        );
        Prompt { system, user }
    }
}
