use thiserror::Error;

use crate::adapters::SourceError;
use crate::insight::ModelError;

/// Validation errors raised while building domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("quote price cannot be empty")]
    EmptyPrice,
    #[error("quote price is not a decimal number: '{value}'")]
    InvalidPrice { value: String },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("timestamp must look like YYYY-MM-DD HH:MM:SS: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Startup configuration errors. Any of these stops the process before the
/// surface renders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("required secret '{name}' is not set")]
    MissingSecret { name: &'static str },

    #[error("'{name}' has invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Failure of one fetch-then-generate interaction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssistantError {
    #[error(transparent)]
    InvalidSymbol(#[from] ValidationError),

    #[error("market data request failed: {0}")]
    MarketData(#[from] SourceError),

    #[error("insight generation failed: {0}")]
    Insight(#[from] ModelError),
}

impl AssistantError {
    /// Stable machine-readable code for logs and the JSON surface.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSymbol(_) => "input.invalid_symbol",
            Self::MarketData(error) => error.code(),
            Self::Insight(error) => error.code(),
        }
    }

    /// Whether the failure came from what the user typed rather than an
    /// upstream service.
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidSymbol(_))
    }
}
