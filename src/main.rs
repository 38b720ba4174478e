use anyhow::{Context, Result};
use prim_mst::config::{Config, UsageError};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        // help text, or clap's own report of a malformed command line
        Err(UsageError::Cli(err)) => err.exit(),
        Err(err) => return fatal(err.into()),
    };

    match try_main(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fatal(err),
    }
}

fn try_main(config: &Config) -> Result<()> {
    init_logging()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    prim_mst::run(config, &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

/// Logs go to stderr; `PRIM_LOG` takes an `EnvFilter` directive
fn init_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("PRIM_LOG")
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;
    Ok(())
}

fn fatal(err: anyhow::Error) -> ExitCode {
    eprintln!("An error occurred: {err:#}");
    ExitCode::FAILURE
}
