//! Transient values for a single interaction.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Ticker as typed, uppercased |
//! | [`Quote`] | Newest intraday observation (timestamp + open price) |
//! | [`Insight`] | Model reply for one quote |
//!
//! Nothing here outlives one click.

mod insight;
mod quote;
mod symbol;

pub use insight::Insight;
pub use quote::{parse_minute_key, Quote};
pub use symbol::Symbol;
