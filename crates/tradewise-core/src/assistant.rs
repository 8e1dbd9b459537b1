//! Fetch-then-generate orchestration for one user action.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::adapters::{AlphaVantageAdapter, QuoteSource};
use crate::config::AssistantConfig;
use crate::http_client::ReqwestHttpClient;
use crate::insight::{InsightGenerator, OpenAiChatModel};
use crate::{AssistantError, Insight, Quote, Symbol};

/// Result of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ready {
        quote: Quote,
        insight: Insight,
    },
    /// `quote` is set when the price was fetched but the model call failed.
    Failed {
        quote: Option<Quote>,
        error: AssistantError,
    },
}

impl Outcome {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Ready { quote, .. } => Some(quote),
            Self::Failed { quote, .. } => quote.as_ref(),
        }
    }

    pub fn insight(&self) -> Option<&Insight> {
        match self {
            Self::Ready { insight, .. } => Some(insight),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&AssistantError> {
        match self {
            Self::Ready { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Stateless orchestrator shared by every surface.
#[derive(Clone)]
pub struct TradingAssistant {
    quotes: Arc<dyn QuoteSource>,
    insights: InsightGenerator,
}

impl TradingAssistant {
    pub fn new(quotes: Arc<dyn QuoteSource>, insights: InsightGenerator) -> Self {
        Self { quotes, insights }
    }

    /// Wire the production Alpha Vantage and OpenAI clients.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new());
        let quotes = Arc::new(AlphaVantageAdapter::from_config(http, config));
        let model = Arc::new(OpenAiChatModel::from_config(config));
        Self::new(quotes, InsightGenerator::from_config(model, config))
    }

    /// Run one interaction for raw user input. Never panics on upstream
    /// failure; every failure ends up in [`Outcome::Failed`].
    pub async fn run(&self, raw_symbol: &str) -> Outcome {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "insight",
            request_id = %request_id.hyphenated(),
            symbol = tracing::field::Empty,
        );

        async move {
            let symbol = match Symbol::parse(raw_symbol) {
                Ok(symbol) => symbol,
                Err(error) => {
                    tracing::info!(%error, "rejected ticker input");
                    return Outcome::Failed {
                        quote: None,
                        error: error.into(),
                    };
                }
            };
            tracing::Span::current().record("symbol", symbol.as_str());

            let started = Instant::now();
            let quote = match self.quotes.latest_quote(&symbol).await {
                Ok(quote) => quote,
                Err(error) => {
                    tracing::warn!(
                        source = self.quotes.name(),
                        code = error.code(),
                        %error,
                        "quote fetch failed"
                    );
                    return Outcome::Failed {
                        quote: None,
                        error: error.into(),
                    };
                }
            };
            tracing::info!(
                price = %quote.price,
                as_of = %quote.as_of,
                elapsed_ms = elapsed_ms(started),
                "quote fetched"
            );

            let started = Instant::now();
            match self.insights.generate(&quote).await {
                Ok(insight) => {
                    tracing::info!(
                        model = %insight.model,
                        chars = insight.text.len(),
                        elapsed_ms = elapsed_ms(started),
                        "insight generated"
                    );
                    Outcome::Ready { quote, insight }
                }
                Err(error) => {
                    tracing::warn!(code = error.code(), %error, "insight generation failed");
                    Outcome::Failed {
                        quote: Some(quote),
                        error: error.into(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// JSON view of an [`Outcome`], shared by the web API and `--format json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeView {
    Ok {
        symbol: String,
        price: String,
        as_of: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        time_zone: Option<String>,
        model: String,
        insight: String,
    },
    Error {
        message: String,
        detail: String,
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        quote: Option<Quote>,
    },
}

impl From<&Outcome> for OutcomeView {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Ready { quote, insight } => Self::Ok {
                symbol: quote.symbol.to_string(),
                price: quote.price.clone(),
                as_of: quote.as_of.clone(),
                time_zone: quote.time_zone.clone(),
                model: insight.model.clone(),
                insight: insight.text.clone(),
            },
            Outcome::Failed { quote, error } => Self::Error {
                message: String::from(crate::report::GENERIC_ERROR),
                detail: error.to_string(),
                code: String::from(error.code()),
                quote: quote.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SourceError;
    use crate::insight::{ChatModel, ChatRequest, ModelError};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedQuotes {
        result: Result<(&'static str, &'static str), SourceError>,
        calls: AtomicUsize,
    }

    impl QuoteSource for FixedQuotes {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn latest_quote<'a>(
            &'a self,
            symbol: &'a Symbol,
        ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.result.clone().and_then(|(price, as_of)| {
                Quote::new(symbol.clone(), price, as_of, None)
                    .map_err(|e| SourceError::malformed(e.to_string()))
            });
            Box::pin(async move { result })
        }
    }

    struct CountingModel {
        reply: Result<String, ModelError>,
        calls: AtomicUsize,
    }

    impl ChatModel for CountingModel {
        fn complete<'a>(
            &'a self,
            _request: ChatRequest,
        ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.clone();
            Box::pin(async move { reply })
        }
    }

    fn assistant(
        quotes: Result<(&'static str, &'static str), SourceError>,
        reply: Result<String, ModelError>,
    ) -> (TradingAssistant, Arc<FixedQuotes>, Arc<CountingModel>) {
        let quotes = Arc::new(FixedQuotes {
            result: quotes,
            calls: AtomicUsize::new(0),
        });
        let model = Arc::new(CountingModel {
            reply,
            calls: AtomicUsize::new(0),
        });
        let assistant =
            TradingAssistant::new(quotes.clone(), InsightGenerator::new(model.clone()));
        (assistant, quotes, model)
    }

    #[tokio::test]
    async fn success_pairs_quote_with_insight() {
        let (assistant, _, model) = assistant(
            Ok(("240.10", "2024-01-02 09:31:00")),
            Ok(String::from("Hold: wait for earnings.")),
        );

        let outcome = assistant.run("tsla").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.quote().map(|q| q.symbol.as_str()), Some("TSLA"));
        assert_eq!(
            outcome.insight().map(|i| i.text.as_str()),
            Some("Hold: wait for earnings.")
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn quote_failure_skips_model() {
        let (assistant, _, model) = assistant(
            Err(SourceError::provider("Invalid API call.")),
            Ok(String::from("unused")),
        );

        let outcome = assistant.run("NOPE").await;
        assert!(matches!(
            outcome.error(),
            Some(AssistantError::MarketData(_))
        ));
        assert!(outcome.quote().is_none());
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_input_touches_nothing() {
        let (assistant, quotes, model) =
            assistant(Ok(("1.00", "2024-01-02 09:31:00")), Ok(String::new()));

        let outcome = assistant.run("   ").await;
        assert!(matches!(
            outcome.error(),
            Some(AssistantError::InvalidSymbol(_))
        ));
        assert_eq!(quotes.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_failure_keeps_quote_but_no_insight() {
        let (assistant, _, _) = assistant(
            Ok(("150.25", "2024-01-01 10:00:00")),
            Err(ModelError::transport("connection reset")),
        );

        let outcome = assistant.run("AAPL").await;
        assert!(matches!(outcome.error(), Some(AssistantError::Insight(_))));
        assert_eq!(outcome.quote().map(|q| q.price.as_str()), Some("150.25"));
        assert!(outcome.insight().is_none());
    }

    #[tokio::test]
    async fn repeated_runs_are_not_memoized() {
        let (assistant, quotes, model) = assistant(
            Ok(("150.25", "2024-01-01 10:00:00")),
            Ok(String::from("Buy")),
        );

        let first = assistant.run("AAPL").await;
        let second = assistant.run("AAPL").await;
        assert_eq!(first, second);
        assert_eq!(quotes.calls.load(Ordering::SeqCst), 2);
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn elapsed_ms_is_measured_from_start() {
        let started = Instant::now();
        assert!(elapsed_ms(started) < 60_000);
    }

    #[test]
    fn error_view_carries_code_and_detail() {
        let outcome = Outcome::Failed {
            quote: None,
            error: SourceError::http_status(500).into(),
        };
        let json = serde_json::to_value(OutcomeView::from(&outcome)).expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "source.unavailable");
        assert!(json["detail"]
            .as_str()
            .is_some_and(|detail| detail.contains("status 500")));
        assert!(json.get("quote").is_none());
    }
}
