//! The shared provider interface.
//!
//! Every vendor adapter implements [`CardProvider`]. Prompt building, reply
//! parsing and id generation are separate capabilities composed into an
//! adapter rather than inherited from a common base.

use async_trait::async_trait;

use crate::types::{GenerationConfig, GenerationResponse, ProgressCallback};

/// Per-million-token prices in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// Estimates the cost of a call from its token counts.
pub trait CostEstimator {
    /// Estimated cost in USD.
    ///
    /// Inputs are not validated; negative or non-finite counts propagate
    /// through the arithmetic.
    fn estimate_cost(&self, prompt_tokens: f64, completion_tokens: f64) -> f64;
}

impl CostEstimator for Pricing {
    fn estimate_cost(&self, prompt_tokens: f64, completion_tokens: f64) -> f64 {
        (prompt_tokens / 1_000_000.0) * self.input_per_million
            + (completion_tokens / 1_000_000.0) * self.output_per_million
    }
}

/// Source of card ids.
pub trait IdGenerator: Send + Sync {
    /// A fresh id, distinct from every id returned before.
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// A flashcard generation backend.
///
/// # Example
///
/// ```no_run
/// use flashgen::{CardProvider, DeepSeekProvider, GenerationConfig};
///
/// # async fn example() -> flashgen::Result<()> {
/// let provider: Box<dyn CardProvider> = Box::new(
///     DeepSeekProvider::builder().api_key("sk-...").build()?,
/// );
///
/// let content = "The mitochondria is the powerhouse of the cell.";
/// let response = provider
///     .generate_cards(content, &GenerationConfig::default(), None)
///     .await;
/// println!("{} cards", response.cards.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CardProvider: CostEstimator + Send + Sync {
    /// Stable provider name recorded in card metadata.
    fn name(&self) -> &str;

    /// Model id requests are sent with.
    fn model(&self) -> &str;

    /// Generate cards from `content`.
    ///
    /// Never fails: errors are reported through the returned response.
    async fn generate_cards(
        &self,
        content: &str,
        config: &GenerationConfig,
        on_progress: Option<&ProgressCallback>,
    ) -> GenerationResponse;

    /// Whether the provider is reachable with the configured credentials.
    async fn test_connection(&self) -> bool;
}
