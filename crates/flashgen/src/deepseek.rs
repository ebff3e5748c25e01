//! The DeepSeek provider and its builder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::draft::{CardStamp, card_from_draft};
use crate::error::{Error, FailureKind, Result};
use crate::locale::Locale;
use crate::parser::{JsonCardParser, ResponseParser};
use crate::progress::{self, ProgressReporter, TICK_PERIOD, tick_while};
use crate::prompt::{Prompt, PromptBuilder, StandardPrompts};
use crate::provider::{CardProvider, CostEstimator, IdGenerator, Pricing, UuidIds};
use crate::request::{ChatRequest, ChatResponse};
use crate::types::{GenerationConfig, GenerationResponse, ProgressCallback, Stage, TokenUsage};

/// Provider name recorded in card metadata.
pub const PROVIDER_NAME: &str = "deepseek";

/// Name used in user-facing messages.
const DISPLAY_NAME: &str = "DeepSeek";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Default model id.
const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// DeepSeek list prices, USD per million tokens.
pub const DEEPSEEK_PRICING: Pricing = Pricing {
    input_per_million: 0.27,
    output_per_million: 1.10,
};

/// Flashcard generation through DeepSeek's chat-completions API.
///
/// # Example
///
/// ```no_run
/// use flashgen::{CardProvider, DeepSeekProvider, GenerationConfig};
///
/// # async fn example() -> flashgen::Result<()> {
/// let provider = DeepSeekProvider::builder()
///     .api_key("sk-...")
///     .model("deepseek-chat")
///     .build()?;
///
/// let progress: &flashgen::ProgressCallback =
///     &|p: flashgen::GenerationProgress| println!("{:>3.0}% {}", p.percentage, p.message);
/// let content = "Photosynthesis converts light to chemical energy";
/// let response = provider
///     .generate_cards(content, &GenerationConfig::default(), Some(progress))
///     .await;
///
/// for card in &response.cards {
///     println!("{} -> {}", card.front, card.back);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DeepSeekProvider {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    locale: Locale,
    prompts: Arc<dyn PromptBuilder>,
    parser: Arc<dyn ResponseParser>,
    ids: Arc<dyn IdGenerator>,
}

impl fmt::Debug for DeepSeekProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl DeepSeekProvider {
    /// Create a builder for provider configuration.
    pub fn builder() -> DeepSeekBuilder {
        DeepSeekBuilder::new()
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The locale used for messages.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Turn an error into a failed response with a localized message.
    pub fn handle_error(&self, err: &Error) -> GenerationResponse {
        let kind = FailureKind::from(err);
        GenerationResponse::failure(self.locale.failure(DISPLAY_NAME, &kind))
    }

    async fn try_generate(
        &self,
        content: &str,
        config: &GenerationConfig,
        reporter: &mut ProgressReporter<'_>,
    ) -> Result<GenerationResponse> {
        let locale = reporter.locale();
        reporter.emit(Stage::Preparing, progress::PREPARING_PERCENT, locale.preparing());

        let prompt = self.prompts.build(content, config);

        reporter.emit(
            Stage::Generating,
            progress::GENERATING_PERCENT,
            locale.generating(DISPLAY_NAME, config.card_count),
        );

        let response = tick_while(self.complete(&prompt, config), TICK_PERIOD, || {
            reporter.tick(DISPLAY_NAME, config.card_count)
        })
        .await?;

        reporter.emit(Stage::Parsing, progress::PARSING_PERCENT, locale.parsing());

        let ChatResponse { choices, usage } = response;
        let raw = choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)?
            .message
            .content
            .unwrap_or_default();
        let drafts = self.parser.parse(&raw)?;

        let stamp = CardStamp {
            provider: PROVIDER_NAME.to_string(),
            model: self.model.clone(),
            temperature: config.temperature,
            generated_at: Utc::now(),
        };
        let cards: Vec<_> = drafts
            .iter()
            .map(|draft| card_from_draft(draft, self.ids.next_id(), &stamp))
            .collect();

        let usage = usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
            estimated_cost: self
                .estimate_cost(u.prompt_tokens as f64, u.completion_tokens as f64),
        });

        reporter.emit(
            Stage::Completed,
            progress::COMPLETED_PERCENT,
            locale.completed(cards.len()),
        );

        Ok(GenerationResponse::success(cards, usage))
    }

    /// Send the completion request and decode the reply.
    async fn complete(&self, prompt: &Prompt, config: &GenerationConfig) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest::new(
            &self.model,
            &prompt.system,
            &prompt.user,
            config.temperature,
            config.max_tokens,
        );

        debug!(
            url = %url,
            model = %self.model,
            max_tokens = config.max_tokens,
            "Sending completion request"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        let chat: ChatResponse = serde_json::from_str(&body)?;
        debug!(choices = chat.choices.len(), "Received completion");
        Ok(chat)
    }
}

/// Report timeouts as [`Error::Timeout`] so they classify by message.
///
/// The URL is dropped from the error text; a port or path segment must not
/// be mistaken for a status code.
fn transport_error(err: reqwest::Error) -> Error {
    if let Some(url) = err.url() {
        debug!(url = %url, error = %err, "Transport error");
    }
    let err = err.without_url();
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else {
        Error::Http(err)
    }
}

impl CostEstimator for DeepSeekProvider {
    fn estimate_cost(&self, prompt_tokens: f64, completion_tokens: f64) -> f64 {
        DEEPSEEK_PRICING.estimate_cost(prompt_tokens, completion_tokens)
    }
}

#[async_trait]
impl CardProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_cards(
        &self,
        content: &str,
        config: &GenerationConfig,
        on_progress: Option<&ProgressCallback>,
    ) -> GenerationResponse {
        let mut reporter = ProgressReporter::new(on_progress, self.locale);

        match self.try_generate(content, config, &mut reporter).await {
            Ok(response) => {
                info!(
                    provider = PROVIDER_NAME,
                    model = %self.model,
                    cards = response.cards.len(),
                    total_tokens = response.usage.map(|u| u.total_tokens),
                    "Generated cards"
                );
                response
            }
            Err(err) => {
                warn!(provider = PROVIDER_NAME, error = %err, "Card generation failed");
                let failed = reporter.locale().failed();
                reporter.emit(Stage::Failed, progress::FAILED_PERCENT, failed);
                self.handle_error(&err)
            }
        }
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        match self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                warn!(status = %response.status(), "DeepSeek connection test rejected");
                false
            }
            Err(err) => {
                warn!(error = %err, "DeepSeek connection test failed");
                false
            }
        }
    }
}

/// Builder for creating a [`DeepSeekProvider`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use flashgen::{DeepSeekProvider, Locale};
///
/// let provider = DeepSeekProvider::builder()
///     .api_key("sk-test")
///     .base_url("http://localhost:8080/v1/")
///     .timeout(Duration::from_secs(30))
///     .locale(Locale::Chinese)
///     .build()
///     .unwrap();
/// assert_eq!(provider.base_url(), "http://localhost:8080/v1");
/// ```
#[derive(Clone)]
pub struct DeepSeekBuilder {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    locale: Locale,
    prompts: Arc<dyn PromptBuilder>,
    parser: Arc<dyn ResponseParser>,
    ids: Arc<dyn IdGenerator>,
}

impl DeepSeekBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
            prompts: Arc::new(StandardPrompts),
            parser: Arc::new(JsonCardParser),
            ids: Arc::new(UuidIds),
        }
    }

    /// Set the API key. Required.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model id.
    ///
    /// Defaults to `deepseek-chat`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.deepseek.com/v1`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Set the message locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Replace the prompt builder.
    pub fn prompt_builder(mut self, prompts: impl PromptBuilder + 'static) -> Self {
        self.prompts = Arc::new(prompts);
        self
    }

    /// Replace the response parser.
    pub fn response_parser(mut self, parser: impl ResponseParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    /// Replace the id generator.
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Build the provider.
    pub fn build(self) -> Result<DeepSeekProvider> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("DeepSeek API key is required".to_string()))?;

        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("base URL must not be empty".to_string()));
        }

        let http_client = Client::builder().timeout(self.timeout).build()?;

        Ok(DeepSeekProvider {
            http_client,
            base_url,
            api_key,
            model: self.model,
            locale: self.locale,
            prompts: self.prompts,
            parser: self.parser,
            ids: self.ids,
        })
    }
}

impl Default for DeepSeekBuilder {
    fn default() -> Self {
        Self::new()
    }
}
