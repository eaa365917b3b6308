use crate::cli::Cli;
use crate::domain::models::RunOptions;
use crate::services::batch::BatchProcessor;
use crate::services::client::MetadataClient;
use crate::services::config::Config;
use crate::services::prompt::StdinConfirm;
use std::io::Write;
use std::process::ExitCode;

/// Print a config template: defaults with environment overrides applied.
pub fn handle_generate(out: &mut dyn Write) -> anyhow::Result<ExitCode> {
    let mut cfg = Config::default();
    cfg.load_env_values();
    writeln!(out, "{}", serde_json::to_string_pretty(&cfg)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Get or replace the publisher's own record.
///
/// The outcome is printed but does not change the exit code.
pub fn handle_self(
    cli: &Cli,
    config: &Config,
    options: &RunOptions,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let client = MetadataClient::new(config, Box::new(StdinConfirm))?;
    let batch = BatchProcessor::new(&client, config, options);
    if cli.set {
        batch.run_self_set(out)?;
    } else {
        batch.run_self_get(out)?;
    }
    Ok(ExitCode::SUCCESS)
}
