use crate::cli::{Cli, Mode};
use crate::domain::models::RunOptions;
use crate::services::batch::{BatchMode, BatchProcessor};
use crate::services::client::MetadataClient;
use crate::services::config::Config;
use crate::services::prompt::StdinConfirm;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;

pub fn handle_runtime_commands(
    cli: &Cli,
    config: &Config,
    options: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    if cli.input.is_empty() {
        info!("no input given");
        return Ok(ExitCode::SUCCESS);
    }
    let client = MetadataClient::new(config, Box::new(StdinConfirm))?;
    let mut batch = BatchProcessor::new(&client, config, options);

    // Removals run first over the same inputs and never count toward the exit code.
    if cli.remove {
        batch.run_removals(&cli.input, out)?;
    }
    let mode = if cli.mode() == Mode::Set {
        BatchMode::Set
    } else {
        BatchMode::Get
    };

    let summary = batch.run(mode, &cli.input, out)?;
    info!(
        "processed {}, skipped {}, failed {}",
        summary.processed, summary.skipped, summary.failed
    );
    if summary.ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
