use std::process::ExitCode;

use tradewise_core::TradingAssistant;
use tradewise_web::AppState;

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn run(args: &ServeArgs, assistant: TradingAssistant) -> Result<ExitCode, CliError> {
    tradewise_web::serve(args.addr, AppState::new(assistant)).await?;
    Ok(ExitCode::SUCCESS)
}
