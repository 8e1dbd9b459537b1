use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Free-text recommendation returned by the model, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub symbol: Symbol,
    pub model: String,
    pub text: String,
}

impl Insight {
    pub fn new(symbol: Symbol, model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            symbol,
            model: model.into(),
            text: text.into(),
        }
    }
}
