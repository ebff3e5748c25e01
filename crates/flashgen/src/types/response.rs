//! The tagged result of a generation call.

use serde::{Deserialize, Serialize};

use super::GeneratedCard;

/// Token accounting and estimated cost for one call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Estimated cost in USD.
    pub estimated_cost: f64,
}

/// Outcome of [`CardProvider::generate_cards`](crate::CardProvider::generate_cards).
///
/// Either every parsed card is present and `success` is true, or `cards` is
/// empty and `error` holds a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub cards: Vec<GeneratedCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    /// A successful response.
    pub fn success(cards: Vec<GeneratedCard>, usage: Option<TokenUsage>) -> Self {
        Self {
            success: true,
            cards,
            error: None,
            usage,
        }
    }

    /// A failed response with no cards.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            cards: Vec::new(),
            error: Some(message.into()),
            usage: None,
        }
    }
}
