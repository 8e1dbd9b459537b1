mod insight;
mod serve;

use std::process::ExitCode;

use tradewise_core::{AssistantConfig, TradingAssistant};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = load_config(cli)?;
    tracing::debug!(?config, "configuration loaded");
    let assistant = TradingAssistant::from_config(&config);

    match &cli.command {
        Command::Serve(args) => serve::run(args, assistant).await,
        Command::Insight(args) => insight::run(args, &assistant).await,
    }
}

/// Environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<AssistantConfig, CliError> {
    let mut config = AssistantConfig::from_env()?;
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(temperature) = cli.temperature {
        config = config.with_temperature(temperature)?;
    }
    Ok(config)
}
