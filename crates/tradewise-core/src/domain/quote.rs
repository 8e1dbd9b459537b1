use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::{Symbol, ValidationError};

/// Latest intraday observation for a ticker.
///
/// `price` and `as_of` are kept exactly as the provider sent them so the
/// prompt and the success line show the provider's own text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: String,
    pub as_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl Quote {
    pub fn new(
        symbol: Symbol,
        price: impl Into<String>,
        as_of: impl Into<String>,
        time_zone: Option<String>,
    ) -> Result<Self, ValidationError> {
        let price = price.into();
        let as_of = as_of.into();
        validate_price(&price)?;
        parse_minute_key(&as_of)?;

        Ok(Self {
            symbol,
            price,
            as_of,
            time_zone,
        })
    }
}

/// Parse a provider time-series key such as `2024-01-02 09:31:00`.
pub fn parse_minute_key(value: &str) -> Result<PrimitiveDateTime, ValidationError> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    PrimitiveDateTime::parse(value.trim(), &format).map_err(|_| {
        ValidationError::InvalidTimestamp {
            value: value.to_owned(),
        }
    })
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPrice);
    }

    let value: f64 = trimmed.parse().map_err(|_| ValidationError::InvalidPrice {
        value: price.to_owned(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidPrice {
            value: price.to_owned(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field: "price" });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("valid symbol")
    }

    #[test]
    fn keeps_price_and_timestamp_verbatim() {
        let quote = Quote::new(symbol(), "150.2500", "2024-01-01 10:00:00", None)
            .expect("quote should build");
        assert_eq!(quote.price, "150.2500");
        assert_eq!(quote.as_of, "2024-01-01 10:00:00");
    }

    #[test]
    fn rejects_non_numeric_price() {
        let error = Quote::new(symbol(), "n/a", "2024-01-01 10:00:00", None)
            .expect_err("must fail");
        assert!(matches!(error, ValidationError::InvalidPrice { .. }));

        let error = Quote::new(symbol(), "NaN", "2024-01-01 10:00:00", None)
            .expect_err("must fail");
        assert!(matches!(error, ValidationError::InvalidPrice { .. }));
    }

    #[test]
    fn rejects_empty_and_negative_price() {
        assert_eq!(
            Quote::new(symbol(), " ", "2024-01-01 10:00:00", None),
            Err(ValidationError::EmptyPrice)
        );
        assert_eq!(
            Quote::new(symbol(), "-1.0", "2024-01-01 10:00:00", None),
            Err(ValidationError::NegativeValue { field: "price" })
        );
    }

    #[test]
    fn rejects_malformed_timestamp() {
        let error = Quote::new(symbol(), "1.0", "09:31", None).expect_err("must fail");
        assert!(matches!(error, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn minute_keys_order_chronologically() {
        let earlier = parse_minute_key("2024-01-01 09:59:00").expect("valid key");
        let later = parse_minute_key("2024-01-01 10:00:00").expect("valid key");
        assert!(later > earlier);
    }

    #[test]
    fn serializes_without_absent_time_zone() {
        let quote = Quote::new(symbol(), "1.00", "2024-01-01 10:00:00", None)
            .expect("quote should build");
        let json = serde_json::to_value(&quote).expect("serialize");
        assert_eq!(json["symbol"], "AAPL");
        assert!(json.get("time_zone").is_none());
    }
}
