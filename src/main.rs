// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use keeperupper::{
    cli::{self, Args},
    client::HttpFetcher,
    printer::{Console, Printer},
    report,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.log_level()) {
        eprintln!("failed to set up logging: {e:#}");
    }

    let console = Console::new();

    match check_sites(&args, &console).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("run failed: {e:?}");
            console.println(&report::render_error(&format!("{e:#}"), args.output_mode()));
            ExitCode::FAILURE
        }
    }
}

async fn check_sites(args: &Args, console: &Console) -> Result<()> {
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    cli::run(args, fetcher, console).await?;
    Ok(())
}

// Logs go to stderr so stdout only ever carries the report.
fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive(format!("keeperupper={level}").parse()?),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
