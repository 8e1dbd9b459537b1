//! Display text for an [`Outcome`], independent of the surface drawing it.

use crate::{Outcome, Quote};

pub const TITLE: &str = "📊 AI Trading Assistant";
pub const SUBTITLE: &str = "Get real-time stock prices and AI-powered trading insights.";
pub const INPUT_LABEL: &str = "Enter Stock Symbol (e.g., AAPL, TSLA)";
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const BUTTON_LABEL: &str = "🔍 Get AI Insight";
pub const INSIGHT_HEADING: &str = "🤖 AI Trading Insight";
pub const GENERIC_ERROR: &str = "Something went wrong fetching data or generating insights.";

/// One visual region of the result area, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Success(String),
    Heading(String),
    /// Model reply, shown verbatim.
    Insight(String),
    Error(String),
    /// Raw failure detail shown under the generic error.
    Detail(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let mut blocks = Vec::with_capacity(4);

        if let Some(quote) = outcome.quote() {
            blocks.push(Block::Success(success_line(quote)));
        }
        if let Some(insight) = outcome.insight() {
            blocks.push(Block::Heading(String::from(INSIGHT_HEADING)));
            blocks.push(Block::Insight(insight.text.clone()));
        }
        if let Some(error) = outcome.error() {
            blocks.push(Block::Error(String::from(GENERIC_ERROR)));
            blocks.push(Block::Detail(error.to_string()));
        }

        Self { blocks }
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Success(text) | Block::Insight(text) => out.push_str(text),
                Block::Heading(text) => {
                    out.push_str(text);
                    out.push('\n');
                    out.push_str(&"-".repeat(text.chars().count()));
                }
                Block::Error(text) => {
                    out.push_str("error: ");
                    out.push_str(text);
                }
                Block::Detail(text) => {
                    out.push_str("  ");
                    out.push_str(text);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// The time zone is left to the JSON view; the line shows the provider's key verbatim.
pub fn success_line(quote: &Quote) -> String {
    format!(
        "📉 {} is currently ${} (as of {})",
        quote.symbol, quote.price, quote.as_of
    )
}
