use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::PrimitiveDateTime;

use super::{QuoteSource, SourceError};
use crate::config::{AssistantConfig, Secret, DEFAULT_ALPHA_VANTAGE_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{parse_minute_key, Quote, Symbol};

/// Key holding the one-minute intraday series in the provider payload.
pub const TIME_SERIES_KEY: &str = "Time Series (1min)";

/// Alpha Vantage `TIME_SERIES_INTRADAY` client at one-minute granularity.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: Secret,
    base_url: String,
    timeout_ms: u64,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: Secret) -> Self {
        Self {
            http_client,
            api_key,
            base_url: String::from(DEFAULT_ALPHA_VANTAGE_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_config(http_client: Arc<dyn HttpClient>, config: &AssistantConfig) -> Self {
        Self {
            http_client,
            api_key: config.alpha_vantage_api_key.clone(),
            base_url: config.alpha_vantage_base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Request for the intraday endpoint; exposed for inspection in tests.
    pub fn intraday_request(&self, symbol: &Symbol) -> HttpRequest {
        HttpRequest::get(format!("{}/query", self.base_url))
            .with_query("function", "TIME_SERIES_INTRADAY")
            .with_query("symbol", symbol.as_str())
            .with_query("interval", "1min")
            .with_query("apikey", self.api_key.expose())
            .with_timeout_ms(self.timeout_ms)
    }

    async fn fetch_latest(&self, symbol: &Symbol) -> Result<Quote, SourceError> {
        let request = self.intraday_request(symbol);
        tracing::debug!(url = %request.redacted_url(), "requesting intraday series");

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("alphavantage transport error: {}", e.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::http_status(response.status));
        }

        parse_intraday(symbol, &response.body)
    }
}

impl QuoteSource for AlphaVantageAdapter {
    fn name(&self) -> &'static str {
        "alphavantage"
    }

    fn latest_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_latest(symbol))
    }
}

/// Extract the newest bucket of an intraday payload.
///
/// The newest bucket is the one with the greatest timestamp, whatever order
/// the provider serialized the keys in.
pub fn parse_intraday(symbol: &Symbol, body: &str) -> Result<Quote, SourceError> {
    let payload: IntradayResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::malformed(format!("failed to parse alphavantage response: {e}"))
    })?;

    let Some(series) = payload.series else {
        return Err(missing_series_error(
            payload.error_message,
            payload.note,
            payload.information,
        ));
    };

    let mut latest: Option<(PrimitiveDateTime, String, IntradayBucket)> = None;
    for (key, bucket) in series {
        let ts = parse_minute_key(&key).map_err(|e| SourceError::malformed(e.to_string()))?;
        if latest.as_ref().map_or(true, |(best, _, _)| ts > *best) {
            latest = Some((ts, key, bucket));
        }
    }

    let Some((_, as_of, bucket)) = latest else {
        return Err(SourceError::empty_series(format!(
            "alphavantage returned an empty time series for {symbol}"
        )));
    };

    let open = bucket.open.ok_or_else(|| {
        SourceError::malformed(format!("bucket '{as_of}' has no '1. open' field"))
    })?;
    let time_zone = payload.meta.and_then(|meta| meta.time_zone);

    Quote::new(symbol.clone(), open, as_of, time_zone)
        .map_err(|e| SourceError::malformed(e.to_string()))
}

fn missing_series_error(
    error_message: Option<String>,
    note: Option<String>,
    information: Option<String>,
) -> SourceError {
    match error_message.or(note).or(information) {
        Some(message) => SourceError::provider(message),
        None => SourceError::malformed(format!("response has no '{TIME_SERIES_KEY}' key")),
    }
}

#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<IntradayMeta>,
    #[serde(rename = "Time Series (1min)")]
    series: Option<BTreeMap<String, IntradayBucket>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntradayMeta {
    #[serde(rename = "6. Time Zone")]
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IntradayBucket {
    #[serde(rename = "1. open")]
    open: Option<String>,
}
