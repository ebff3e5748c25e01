//! Error types for the flashgen crate.
//!
//! Provider calls never surface these to callers of
//! [`CardProvider::generate_cards`](crate::CardProvider::generate_cards);
//! they are classified into a [`FailureKind`] and folded into a failed
//! [`GenerationResponse`](crate::GenerationResponse). They are returned
//! directly from construction and from the lower-level helpers.
//!
//! # Classification
//!
//! Classification inspects the error's display text only, so an
//! [`Error::Api`] carrying `401 Unauthorized` and an upstream message that
//! merely mentions "quota" are treated the same way a human reading the
//! message would treat them:
//!
//! ```
//! use flashgen::{Error, FailureKind};
//!
//! let err = Error::Api {
//!     status: 429,
//!     reason: "Too Many Requests".to_string(),
//!     body: String::new(),
//! };
//! assert_eq!(FailureKind::classify(&err.to_string()), FailureKind::RateLimited);
//! ```

use thiserror::Error;

/// The error type for provider operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network error from reqwest.
    ///
    /// Timeouts are reported as [`Error::Timeout`] instead.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The provider answered with a non-success status.
    #[error("API error {status} {reason}: {body}")]
    Api {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase, e.g. `Unauthorized`.
        reason: String,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The completion had no choices to read a message from.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The model's reply could not be turned into card drafts.
    ///
    /// Carries the reason only, never the model's text.
    #[error("could not parse cards from model output: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// A specialized Result type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse failure category shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The API key was rejected.
    InvalidApiKey,
    /// The provider is throttling requests.
    RateLimited,
    /// The account has no remaining balance or quota.
    QuotaExceeded,
    /// The request timed out.
    Timeout,
    /// Anything else; carries the original message.
    Other(String),
    /// No message was available at all.
    Unknown,
}

impl FailureKind {
    /// Classify an error message by substring, first match wins.
    ///
    /// Order: `401`/`Unauthorized`, `429`/`rate limit`, `quota`, `timeout`.
    pub fn classify(message: &str) -> Self {
        if message.trim().is_empty() {
            FailureKind::Unknown
        } else if message.contains("401") || message.contains("Unauthorized") {
            FailureKind::InvalidApiKey
        } else if message.contains("429") || message.contains("rate limit") {
            FailureKind::RateLimited
        } else if message.contains("quota") {
            FailureKind::QuotaExceeded
        } else if message.contains("timeout") {
            FailureKind::Timeout
        } else {
            FailureKind::Other(message.to_string())
        }
    }
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        FailureKind::classify(&err.to_string())
    }
}
