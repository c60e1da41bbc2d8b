//! # mapp-check entry point
//!
//! Parses command-line arguments, initialises logging, resolves settings,
//! and runs the check.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mapp_cli::{run_check, CheckArgs, CheckSettings, FileConfig};

/// Test an integration bundle against best practices.
///
/// Unpacks the bundle, checks authentication, OAuth for writeback actions,
/// endpoint pagination, incremental syncs, plaintext secrets, and service
/// action data updates, then writes a report of every failure.
#[derive(Parser, Debug)]
#[command(name = "mapp-check", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    check: CheckArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mapp-check starting");

    let file_config = match &cli.config {
        Some(path) => match FileConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::from(1);
            }
        },
        None => FileConfig::default(),
    };
    let settings = CheckSettings::resolve(&cli.check, &file_config);
    tracing::debug!(?settings, "resolved settings");

    match run_check(&settings) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
