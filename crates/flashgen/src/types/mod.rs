//! Domain types for flashcard generation.
//!
//! This module contains the data structures exchanged with callers: the
//! per-call configuration, progress snapshots, generated cards and the
//! overall response.

mod card;
mod config;
mod progress;
mod response;

pub use card::{CardMetadata, CardType, GeneratedCard};
pub use config::{GenerationConfig, PromptTemplate};
pub use progress::{GenerationProgress, ProgressCallback, Stage};
pub use response::{GenerationResponse, TokenUsage};
