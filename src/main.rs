use anyhow::Context;
use clap::Parser;
use hashref::cli::{Cli, Mode};
use hashref::commands::{handle_generate, handle_runtime_commands, handle_self};
use hashref::domain::models::RunOptions;
use hashref::services::config::load_config;
use hashref::services::metadata::split_meta_arg;
use hashref::services::prompt::{Confirm, StdinConfirm};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("flags: {:?}", cli);

    let Some(mut out) = open_output(&cli)? else {
        return Ok(ExitCode::FAILURE);
    };

    let code = match cli.mode() {
        Mode::Generate => handle_generate(&mut *out)?,
        mode => {
            let mut config = load_config(cli.config.as_deref())?;
            config.load_env_values();
            let options = RunOptions {
                details: cli.details,
                assume_yes: cli.yes,
                publisher_scope: cli.publisher.clone().filter(|p| !p.is_empty()),
                meta_files: cli.meta.as_deref().map(split_meta_arg).unwrap_or_default(),
            };
            if mode == Mode::SelfManage {
                handle_self(&cli, &config, &options, &mut *out)?
            } else {
                handle_runtime_commands(&cli, &config, &options, &mut *out)?
            }
        }
    };
    out.flush()?;
    Ok(code)
}

// Silent unless -v or RUST_LOG asks for it; stderr doubles as the default output.
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    if verbose {
        if let Ok(directive) = "hashref=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve `-o`. `None` means the user declined to overwrite an existing file.
fn open_output(cli: &Cli) -> anyhow::Result<Option<Box<dyn Write>>> {
    match cli.output.as_deref() {
        None | Some("") => Ok(Some(Box::new(std::io::stderr()))),
        Some("-") => Ok(Some(Box::new(std::io::stdout()))),
        Some(path) => {
            if Path::new(path).exists() {
                if !cli.yes
                    && !StdinConfirm.confirm(&format!("Overwrite existing file {}?", path))
                {
                    info!("aborted");
                    return Ok(None);
                }
                info!("overwrite {}", path);
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot open output file {}", path))?;
            Ok(Some(Box::new(std::io::BufWriter::new(file))))
        }
    }
}
