//! Normalization of card drafts into [`GeneratedCard`]s.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::parser::CardDraft;
use crate::types::{CardMetadata, CardType, GeneratedCard};

/// Provenance applied to every card of one call.
#[derive(Debug, Clone)]
pub struct CardStamp {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub generated_at: DateTime<Utc>,
}

/// Build a card from a draft.
///
/// The type defaults to [`CardType::Basic`]; `front`/`back` are always text;
/// missing tags and images become empty lists. Keys are looked up in
/// camelCase first, then snake_case.
pub fn card_from_draft(draft: &CardDraft, id: String, stamp: &CardStamp) -> GeneratedCard {
    let card_type = match field(draft, "type", "card_type") {
        Some(Value::String(tag)) => CardType::from_tag(tag),
        Some(Value::Null) | None => CardType::Basic,
        Some(other) => CardType::from_tag(&text(other)),
    };

    GeneratedCard {
        id,
        card_type,
        front: draft.get("front").map(text).unwrap_or_default(),
        back: draft.get("back").map(text).unwrap_or_default(),
        choices: draft.get("choices").and_then(text_list),
        correct_answer: field(draft, "correctAnswer", "correct_answer")
            .filter(|v| !v.is_null())
            .cloned(),
        cloze_text: field(draft, "clozeText", "cloze_text").and_then(optional_text),
        tags: draft.get("tags").and_then(text_list).unwrap_or_default(),
        images: draft.get("images").and_then(text_list).unwrap_or_default(),
        explanation: draft.get("explanation").and_then(optional_text),
        metadata: CardMetadata {
            generated_at: stamp.generated_at,
            provider: stamp.provider.clone(),
            model: stamp.model.clone(),
            temperature: stamp.temperature,
        },
    }
}

fn field<'a>(draft: &'a CardDraft, camel: &str, snake: &str) -> Option<&'a Value> {
    draft.get(camel).or_else(|| draft.get(snake))
}

/// Coerce any JSON value to text. Null is the empty string.
fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(text(other)),
    }
}

/// Arrays become lists of text; a lone string becomes a one-element list.
fn text_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter(|v| !v.is_null()).map(text).collect()),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stamp() -> CardStamp {
        CardStamp {
            provider: "deepseek".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.3,
            generated_at: Utc::now(),
        }
    }

    fn draft(value: Value) -> CardDraft {
        match value {
            Value::Object(map) => map,
            _ => panic!("draft must be an object"),
        }
    }

    #[test]
    fn test_missing_type_defaults_to_basic() {
        let card = card_from_draft(&draft(json!({"front": "Q", "back": "A"})), "1".into(), &stamp());
        assert_eq!(card.card_type, CardType::Basic);
        assert_eq!(card.front, "Q");
        assert_eq!(card.back, "A");
    }

    #[test]
    fn test_non_string_front_back_are_coerced() {
        let card = card_from_draft(
            &draft(json!({"front": 42, "back": true})),
            "1".into(),
            &stamp(),
        );
        assert_eq!(card.front, "42");
        assert_eq!(card.back, "true");

        let card = card_from_draft(&draft(json!({"front": null})), "2".into(), &stamp());
        assert_eq!(card.front, "");
        assert_eq!(card.back, "");

        let card = card_from_draft(&draft(json!({"back": ["a", "b"]})), "3".into(), &stamp());
        assert_eq!(card.back, r#"["a","b"]"#);
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let card = card_from_draft(&draft(json!({"front": "Q"})), "1".into(), &stamp());
        assert!(card.tags.is_empty());
        assert!(card.images.is_empty());
        assert!(card.choices.is_none());
        assert!(card.correct_answer.is_none());
        assert!(card.cloze_text.is_none());
        assert!(card.explanation.is_none());
    }

    #[test]
    fn test_pass_through_fields() {
        let card = card_from_draft(
            &draft(json!({
                "type": "multiple-choice",
                "front": "Largest planet?",
                "back": "Jupiter",
                "choices": ["Mars", "Jupiter", "Venus", "Earth"],
                "correctAnswer": 1,
                "tags": ["astronomy"],
                "images": ["jupiter.png"],
                "explanation": "Jupiter is a gas giant."
            })),
            "id-1".into(),
            &stamp(),
        );
        assert_eq!(card.id, "id-1");
        assert_eq!(card.card_type, CardType::MultipleChoice);
        assert_eq!(card.choices.as_ref().map(Vec::len), Some(4));
        assert_eq!(card.correct_answer, Some(json!(1)));
        assert_eq!(card.tags, vec!["astronomy"]);
        assert_eq!(card.images, vec!["jupiter.png"]);
        assert_eq!(card.explanation.as_deref(), Some("Jupiter is a gas giant."));
    }

    #[test]
    fn test_snake_case_keys() {
        let card = card_from_draft(
            &draft(json!({
                "card_type": "cloze",
                "cloze_text": "{{c1::ATP}} is energy currency",
                "correct_answer": "ATP"
            })),
            "1".into(),
            &stamp(),
        );
        assert_eq!(card.card_type, CardType::Cloze);
        assert_eq!(card.cloze_text.as_deref(), Some("{{c1::ATP}} is energy currency"));
        assert_eq!(card.correct_answer, Some(json!("ATP")));
    }

    #[test]
    fn test_metadata_stamped() {
        let stamp = stamp();
        let card = card_from_draft(&draft(json!({})), "1".into(), &stamp);
        assert_eq!(card.metadata.provider, "deepseek");
        assert_eq!(card.metadata.model, "deepseek-chat");
        assert_eq!(card.metadata.temperature, 0.3);
        assert_eq!(card.metadata.generated_at, stamp.generated_at);
    }
}
