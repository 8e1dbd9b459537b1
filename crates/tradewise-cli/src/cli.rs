//! CLI argument definitions for tradewise.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Start the single-page web surface |
//! | `insight` | Run one fetch-then-generate interaction in the terminal |
//!
//! # Examples
//!
//! ```bash
//! tradewise serve --addr 0.0.0.0:8501
//! tradewise insight TSLA
//! tradewise insight msft --format json --temperature 0.2
//! ```

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tradewise_core::report::DEFAULT_SYMBOL;

/// 📈 tradewise - latest price plus an AI trading insight
///
/// Reads OPENAI_API_KEY and ALPHA_VANTAGE_API_KEY from the environment.
#[derive(Debug, Parser)]
#[command(name = "tradewise", author, version, about = "Latest price plus an AI trading insight")]
pub struct Cli {
    /// Override the chat model identifier (TRADEWISE_MODEL).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Override the sampling temperature (TRADEWISE_TEMPERATURE).
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 🌐 Serve the input page.
    ///
    ///   tradewise serve
    ///   tradewise serve --addr 0.0.0.0:8080
    Serve(ServeArgs),

    /// 🔍 Fetch the latest price and ask for an insight once.
    ///
    ///   tradewise insight
    ///   tradewise insight TSLA --format json
    Insight(InsightArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, default_value = "127.0.0.1:8501")]
    pub addr: SocketAddr,
}

#[derive(Debug, Args)]
pub struct InsightArgs {
    /// Ticker symbol; uppercased before use.
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    Text,
    /// Single JSON object.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_defaults_to_aapl_text() {
        let cli = Cli::try_parse_from(["tradewise", "insight"]).expect("should parse");
        match cli.command {
            Command::Insight(args) => {
                assert_eq!(args.symbol, "AAPL");
                assert_eq!(args.format, OutputFormat::Text);
            }
            Command::Serve(_) => panic!("expected insight command"),
        }
    }

    #[test]
    fn global_overrides_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tradewise",
            "insight",
            "tsla",
            "--format",
            "json",
            "--model",
            "gpt-4o-mini",
            "--temperature",
            "0.3",
        ])
        .expect("should parse");
        assert_eq!(cli.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(cli.temperature, Some(0.3));
    }

    #[test]
    fn serve_default_address() {
        let cli = Cli::try_parse_from(["tradewise", "serve"]).expect("should parse");
        match cli.command {
            Command::Serve(args) => assert_eq!(args.addr.to_string(), "127.0.0.1:8501"),
            Command::Insight(_) => panic!("expected serve command"),
        }
    }

    #[test]
    fn invalid_address_is_rejected() {
        assert!(Cli::try_parse_from(["tradewise", "serve", "--addr", "nowhere"]).is_err());
    }
}
