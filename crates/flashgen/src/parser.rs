//! Extraction of card drafts from model output.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// A loosely typed card object as the model wrote it.
pub type CardDraft = Map<String, Value>;

/// Turns raw model text into card drafts.
pub trait ResponseParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Vec<CardDraft>>;
}

/// Parses JSON card lists, tolerating code fences and surrounding prose.
///
/// Accepted shapes:
/// - `[{...}, {...}]`
/// - `{"cards": [{...}]}`
/// - a single `{...}` card
///
/// Array elements that are not objects are skipped.
///
/// # Example
///
/// ```
/// use flashgen::{JsonCardParser, ResponseParser};
///
/// let raw = "Here you go:\n```json\n[{\"front\": \"Q\", \"back\": \"A\"}]\n```";
/// let drafts = JsonCardParser.parse(raw).unwrap();
/// assert_eq!(drafts.len(), 1);
/// assert_eq!(drafts[0]["front"], "Q");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonCardParser;

impl ResponseParser for JsonCardParser {
    fn parse(&self, raw: &str) -> Result<Vec<CardDraft>> {
        let text = strip_code_fence(raw.trim());
        let Some(value) = find_json(text) else {
            return Err(rejected(raw, "no JSON found"));
        };

        match value {
            Value::Array(items) => Ok(objects(items)),
            Value::Object(mut map) => match map.remove("cards") {
                Some(Value::Array(items)) => Ok(objects(items)),
                Some(other) => {
                    map.insert("cards".to_string(), other);
                    Ok(vec![map])
                }
                None => Ok(vec![map]),
            },
            _ => Err(rejected(raw, "expected a JSON array or object")),
        }
    }
}

fn objects(items: Vec<Value>) -> Vec<CardDraft> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

/// Return the body of the first fenced block, or the input unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text;
    };
    let after = &text[start + 3..];
    // Skip an info string such as `json`.
    let body = match after.find('\n') {
        Some(newline) => &after[newline + 1..],
        None => after,
    };
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn find_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }
    [('[', ']'), ('{', '}')].into_iter().find_map(|(open, close)| {
        let start = text.find(open)?;
        let end = text.rfind(close)?;
        if end <= start {
            return None;
        }
        serde_json::from_str::<Value>(&text[start..=end]).ok()
    })
}

/// The model's text stays out of the error; it is only logged.
fn rejected(raw: &str, reason: &str) -> Error {
    debug!(output = %preview(raw), reason, "Unparseable model output");
    Error::Parse(reason.to_string())
}

fn preview(raw: &str) -> String {
    const MAX: usize = 120;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "empty output".to_string();
    }
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let drafts = JsonCardParser
            .parse(r#"[{"front": "a", "back": "b"}, {"front": "c", "back": "d"}]"#)
            .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1]["back"], "d");
    }

    #[test]
    fn test_parse_fenced_block() {
        let raw = "```json\n[{\"front\": \"a\", \"back\": \"b\"}]\n```\nHope this helps!";
        assert_eq!(JsonCardParser.parse(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_array_inside_prose() {
        let raw = "Sure! [{\"front\": \"a\", \"back\": \"b\"}] Let me know.";
        assert_eq!(JsonCardParser.parse(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_cards_wrapper_and_single_object() {
        let wrapped = JsonCardParser
            .parse(r#"{"cards": [{"front": "a"}, {"front": "b"}]}"#)
            .unwrap();
        assert_eq!(wrapped.len(), 2);

        let single = JsonCardParser.parse(r#"{"front": "a", "back": "b"}"#).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_parse_skips_non_objects() {
        let drafts = JsonCardParser
            .parse(r#"[{"front": "a"}, "stray", 3, null]"#)
            .unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(JsonCardParser.parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = JsonCardParser.parse("I cannot help with that.").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(!err.to_string().contains("I cannot help"));

        assert!(JsonCardParser.parse("").is_err());
        assert!(JsonCardParser.parse("42").is_err());
    }

    #[test]
    fn test_parse_error_omits_model_text() {
        let err = JsonCardParser
            .parse("The notes about room 401 ran into a quota timeout.")
            .unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("401"));
        assert!(!message.contains("quota"));
        assert!(!message.contains("timeout"));
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("  "), "empty output");
        let long = "x".repeat(200);
        assert_eq!(preview(&long).len(), 123);
    }
}
