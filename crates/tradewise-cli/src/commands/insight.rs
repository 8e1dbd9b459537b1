use std::io::Write;
use std::process::ExitCode;

use tradewise_core::{Outcome, OutcomeView, Report, TradingAssistant};

use crate::cli::{InsightArgs, OutputFormat};
use crate::error::CliError;

/// Exit status of a run whose quote fetch or model call failed.
const FAILED_INTERACTION: u8 = 3;

pub async fn run(args: &InsightArgs, assistant: &TradingAssistant) -> Result<ExitCode, CliError> {
    let outcome = assistant.run(&args.symbol).await;

    let mut stdout = std::io::stdout().lock();
    write_outcome(&mut stdout, args.format, &outcome)?;
    stdout.flush()?;

    Ok(ExitCode::from(exit_status(&outcome)))
}

fn write_outcome(
    out: &mut impl Write,
    format: OutputFormat,
    outcome: &Outcome,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => out.write_all(Report::from_outcome(outcome).to_text().as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &OutcomeView::from(outcome))?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn exit_status(outcome: &Outcome) -> u8 {
    if outcome.is_success() {
        0
    } else {
        FAILED_INTERACTION
    }
}
