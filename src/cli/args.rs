//! Argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Ajustar: build optimizers and LR schedulers from configuration
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "ajustar")]
#[command(version)]
#[command(about = "Build optimizers and learning rate schedulers from YAML configuration")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List registered optimizers and schedulers
    List,

    /// Build the configured optimizer and scheduler and print their state
    Show(ShowArgs),
}

/// Arguments for the show command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "FILE")]
    pub config: PathBuf,

    /// Number of epochs to step the scheduler through
    #[arg(short, long, default_value_t = 10)]
    pub epochs: usize,
}

/// Parse arguments without exiting on error
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
