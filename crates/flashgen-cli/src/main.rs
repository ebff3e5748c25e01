//! Command-line flashcard generation via DeepSeek.
//!
//! Reads source text from a file or stdin, asks the model for cards and
//! prints the resulting response as JSON.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use flashgen::{
    CardProvider, DeepSeekProvider, GenerationConfig, GenerationProgress, Locale,
    ProgressCallback, PromptTemplate,
};
use tracing::{debug, info};

// ============================================================================
// CLI Arguments
// ============================================================================

/// Generate flashcards from text with DeepSeek.
#[derive(Parser, Debug)]
#[command(name = "flashgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// DeepSeek API key
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model id
    #[arg(long, env = "DEEPSEEK_MODEL", default_value = "deepseek-chat")]
    model: String,

    /// API base URL
    #[arg(long, env = "DEEPSEEK_BASE_URL", default_value = "https://api.deepseek.com/v1")]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Message language: en or zh
    #[arg(long, default_value = "en")]
    locale: Locale,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate cards from a file, or stdin when no file is given
    Generate {
        /// Source text file
        file: Option<PathBuf>,

        /// Number of cards to request
        #[arg(short = 'n', long, default_value_t = 5)]
        cards: u32,

        /// Sampling temperature
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,

        /// Output token budget
        #[arg(long, default_value_t = 2000)]
        max_tokens: u32,

        /// Prompt template: basic, cloze, multiple-choice or mixed
        #[arg(long, default_value = "basic")]
        template: PromptTemplate,

        /// Pretty-print the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Check that the API is reachable with the given key
    Check,
}

fn read_source(file: Option<&PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn log_progress(progress: GenerationProgress) {
    info!(
        stage = ?progress.stage,
        percent = progress.percentage.round() as u64,
        "{}",
        progress.message
    );
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let provider = DeepSeekProvider::builder()
        .api_key(args.api_key)
        .model(&args.model)
        .base_url(&args.base_url)
        .timeout(Duration::from_secs(args.timeout_secs))
        .locale(args.locale)
        .build()?;

    debug!(?provider, "Provider configured");

    match args.command {
        Command::Check => {
            if provider.test_connection().await {
                println!("ok");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unreachable");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Generate {
            file,
            cards,
            temperature,
            max_tokens,
            template,
            pretty,
        } => {
            let content = read_source(file.as_ref())?;
            let config = GenerationConfig {
                card_count: cards,
                temperature,
                max_tokens,
                template,
            };

            info!(
                model = %args.model,
                cards = config.card_count,
                template = %config.template,
                "Generating cards"
            );

            let on_progress: &ProgressCallback = &log_progress;
            let response = provider
                .generate_cards(&content, &config, Some(on_progress))
                .await;

            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{}", json);

            if response.success {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
