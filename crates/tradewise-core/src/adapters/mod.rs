//! Market-data adapters.
//!
//! A [`QuoteSource`] turns a ticker into the newest intraday [`Quote`]. Every
//! failure comes back as a [`SourceError`] whose kind records what went wrong
//! (transport, provider message, malformed payload) even though the surface
//! currently shows all of them the same way.

pub mod alphavantage;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Quote, Symbol};

pub use alphavantage::AlphaVantageAdapter;

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Provider,
    Malformed,
    EmptySeries,
}

/// Structured market-data failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    status: Option<u16>,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    pub fn http_status(status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: format!("market data provider returned status {status}"),
            status: Some(status),
        }
    }

    /// The provider answered with its own error or throttling note.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Provider, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Malformed, message)
    }

    pub fn empty_series(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::EmptySeries, message)
    }

    fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Provider => "source.provider",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::EmptySeries => "source.empty_series",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Contract for anything that can produce the newest intraday quote.
pub trait QuoteSource: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    fn latest_quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, SourceError>> + Send + 'a>>;
}
