//! Progress snapshots emitted during a generation call.

use serde::Serialize;

/// A named point in the progress sequence.
///
/// A successful run goes `Preparing → Generating → Parsing → Completed`;
/// a failed run ends in `Failed` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preparing,
    Generating,
    Parsing,
    Completed,
    Failed,
}

/// One status update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationProgress {
    /// Current stage.
    pub stage: Stage,
    /// Percentage in `0..=100`.
    pub percentage: f64,
    /// Human-readable message.
    pub message: String,
}

impl GenerationProgress {
    pub fn new(stage: Stage, percentage: f64, message: impl Into<String>) -> Self {
        Self {
            stage,
            percentage,
            message: message.into(),
        }
    }
}

/// Caller-supplied sink for progress updates.
pub type ProgressCallback = dyn Fn(GenerationProgress) + Send + Sync;
