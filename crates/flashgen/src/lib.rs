//! Async flashcard generation from text via LLM chat-completion providers.
//!
//! A provider sends source text to a model, parses the reply into loosely
//! typed card drafts and normalizes them into [`GeneratedCard`]s. Every
//! provider implements [`CardProvider`]; [`DeepSeekProvider`] is the
//! DeepSeek implementation.
//!
//! # Quick Start
//!
//! ```no_run
//! use flashgen::{CardProvider, DeepSeekProvider, GenerationConfig};
//!
//! # async fn example() -> flashgen::Result<()> {
//! let provider = DeepSeekProvider::builder()
//!     .api_key(std::env::var("DEEPSEEK_API_KEY").unwrap_or_default())
//!     .build()?;
//!
//! let config = GenerationConfig {
//!     card_count: 3,
//!     ..Default::default()
//! };
//! let response = provider
//!     .generate_cards("Photosynthesis converts light to chemical energy", &config, None)
//!     .await;
//!
//! if response.success {
//!     for card in &response.cards {
//!         println!("Q: {}\nA: {}\n", card.front, card.back);
//!     }
//! } else {
//!     eprintln!("{}", response.error.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Composition
//!
//! A provider is assembled from small capabilities, each replaceable through
//! the builder:
//!
//! - [`PromptBuilder`] - content and settings to a system/user prompt pair
//!   (default [`StandardPrompts`])
//! - [`ResponseParser`] - model text to card drafts (default [`JsonCardParser`])
//! - [`IdGenerator`] - card ids (default [`UuidIds`])
//! - [`CostEstimator`] - token counts to an estimated price
//!
//! # Failure Handling
//!
//! [`CardProvider::generate_cards`] never returns an error. Failures are
//! classified by [`FailureKind`] and reported as a [`GenerationResponse`]
//! with `success == false`, no cards and a message in the configured
//! [`Locale`].

pub mod deepseek;
mod draft;
pub mod error;
mod locale;
pub mod parser;
pub mod progress;
pub mod prompt;
pub mod provider;
mod request;
pub mod types;

pub use deepseek::{DEEPSEEK_PRICING, DeepSeekBuilder, DeepSeekProvider, PROVIDER_NAME};
pub use draft::{CardStamp, card_from_draft};
pub use error::{Error, FailureKind, Result};
pub use locale::Locale;
pub use parser::{CardDraft, JsonCardParser, ResponseParser};
pub use prompt::{Prompt, PromptBuilder, StandardPrompts};
pub use provider::{CardProvider, CostEstimator, IdGenerator, Pricing, UuidIds};
pub use types::{
    CardMetadata, CardType, GeneratedCard, GenerationConfig, GenerationProgress,
    GenerationResponse, ProgressCallback, PromptTemplate, Stage, TokenUsage,
};
