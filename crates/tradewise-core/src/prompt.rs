use crate::Quote;

/// Instruction sent with every quote.
pub const DEFAULT_TEMPLATE: &str = "The current price of {symbol} is ${price}. Provide a concise yet smart trading insight (buy/sell/hold), with reasoning and risk advice.";

/// Natural-language template with `{symbol}` and `{price}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Substitute the quote's symbol and price. Placeholder-looking text in
    /// the substituted values is not expanded again.
    pub fn render(&self, quote: &Quote) -> String {
        let mut rendered = String::with_capacity(self.text.len() + 16);
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{symbol}") {
                rendered.push_str(quote.symbol.as_str());
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{price}") {
                rendered.push_str(&quote.price);
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
        rendered.push_str(rest);
        rendered
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
