// src/cli/mod.rs
//! Command line surface: argument definitions and the end-to-end run.
//!
//! ```text
//! keeperupper --config sites.ini
//! keeperupper --config sites.ini --simple --timeout 3
//! keeperupper --config sites.yaml --name shop --json
//! ```
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::debug;

use crate::client::Fetcher;
use crate::config;
use crate::error::Result;
use crate::health::{select_sites, HealthChecker, ResultSet, TransportPolicy};
use crate::metrics::MetricsRegistry;
use crate::printer::Printer;
use crate::report::{self, OutputMode};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file to use (INI, or YAML/JSON by extension)
    #[arg(short, long, env = "KEEPERUPPER_CONFIG")]
    pub config: PathBuf,

    /// Output simple information (number of sites alive:dead)
    #[arg(short, long, conflicts_with = "json")]
    pub simple: bool,

    /// Override every site's timeout with this many seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Only check the site with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output JSON only
    #[arg(short, long)]
    pub json: bool,

    /// Count sites that fail with a network error as dead instead of stopping
    #[arg(long)]
    pub dead_on_error: bool,

    /// Write Prometheus metrics for the run to stderr after the report
    #[arg(long)]
    pub metrics: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.simple {
            OutputMode::Simple
        } else {
            OutputMode::Plain
        }
    }

    pub fn transport_policy(&self) -> TransportPolicy {
        if self.dead_on_error {
            TransportPolicy::MarkDead
        } else {
            TransportPolicy::Abort
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Load, select, check, render and print. Nothing is printed on error; the
/// caller decides how to report it.
pub async fn run<F: Fetcher>(args: &Args, fetcher: F, printer: &dyn Printer) -> Result<ResultSet> {
    let sites = config::load_sites(&args.config).await?;
    let selected = select_sites(&sites, args.name.as_deref(), &args.config)?;
    debug!("Checking {} of {} configured sites", selected.len(), sites.len());

    let registry = if args.metrics {
        Some(MetricsRegistry::new()?)
    } else {
        None
    };

    let mut checker = HealthChecker::new(fetcher).with_policy(args.transport_policy());
    if let Some(registry) = &registry {
        checker = checker.with_metrics(registry.collector());
    }

    let results = checker.check(selected, args.timeout).await?;
    let text = report::render(&results, args.output_mode(), args.name.as_deref())?;
    printer.println(&text);

    if let Some(registry) = &registry {
        printer.eprintln(registry.gather()?.trim_end());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("keeperupper").chain(argv.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-c", "sites.ini", "-s", "-t", "4", "-n", "shop"]).unwrap();

        assert_eq!(args.config, PathBuf::from("sites.ini"));
        assert_eq!(args.timeout, Some(4));
        assert_eq!(args.name.as_deref(), Some("shop"));
        assert_eq!(args.output_mode(), OutputMode::Simple);
        assert_eq!(args.transport_policy(), TransportPolicy::Abort);
    }

    #[test]
    fn test_long_flags() {
        let args = parse(&["--config", "sites.ini", "--json", "--dead-on-error", "-vv"]).unwrap();

        assert_eq!(args.output_mode(), OutputMode::Json);
        assert_eq!(args.transport_policy(), TransportPolicy::MarkDead);
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn test_plain_is_default_mode() {
        let args = parse(&["-c", "sites.ini"]).unwrap();

        assert_eq!(args.output_mode(), OutputMode::Plain);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_simple_and_json_conflict() {
        let err = parse(&["-c", "sites.ini", "-s", "-j"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(parse(&["-c", "sites.ini", "-t", "0"]).is_err());
    }
}
