//! # Tradewise Core
//!
//! Fetch the newest intraday price for a ticker and ask a chat-completion
//! model for a short buy/sell/hold insight about it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Market-data client (Alpha Vantage intraday) |
//! | [`assistant`] | Fetch-then-generate orchestration |
//! | [`config`] | Startup configuration and secrets |
//! | [`domain`] | Symbol, Quote, Insight |
//! | [`error`] | Validation, config, and interaction errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`insight`] | Chat model trait, OpenAI client, insight generator |
//! | [`prompt`] | Prompt template |
//! | [`report`] | Display text for an outcome |
//!
//! ## Flow
//!
//! ```text
//! input ──▶ Symbol::parse ──▶ QuoteSource::latest_quote ──▶ InsightGenerator::generate
//!                │                     │                              │
//!                └──── error ──────────┴──────────── error ───────────┴──▶ Outcome
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradewise_core::{AssistantConfig, Report, TradingAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssistantConfig::from_env()?;
//!     let assistant = TradingAssistant::from_config(&config);
//!
//!     let outcome = assistant.run("AAPL").await;
//!     print!("{}", Report::from_outcome(&outcome).to_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Security
//!
//! API keys are held in [`config::Secret`], redacted from `Debug` output and
//! from logged URLs.

pub mod adapters;
pub mod assistant;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod insight;
pub mod prompt;
pub mod report;

pub use adapters::{AlphaVantageAdapter, QuoteSource, SourceError, SourceErrorKind};
pub use assistant::{Outcome, OutcomeView, TradingAssistant};
pub use config::{AssistantConfig, Secret};
pub use domain::{parse_minute_key, Insight, Quote, Symbol};
pub use error::{AssistantError, ConfigError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use insight::{
    ChatMessage, ChatModel, ChatRequest, InsightGenerator, ModelError, ModelErrorKind,
    OpenAiChatModel, Role,
};
pub use prompt::PromptTemplate;
pub use report::{Block, Report};
