//! Ajustar CLI
//!
//! # Usage
//!
//! ```bash
//! # List registered optimizers and schedulers
//! ajustar list
//!
//! # Build from config and walk the schedule
//! ajustar show config.yaml --epochs 20
//!
//! # Debug logging
//! RUST_LOG=ajustar=debug ajustar show config.yaml
//! ```

use ajustar::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
