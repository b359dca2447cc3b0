//! Command-line interface
//!
//! ```bash
//! ajustar list
//! ajustar show config.yaml --epochs 20
//! ```

mod args;
mod commands;

pub use args::{parse_args, Cli, Command, ShowArgs};
pub use commands::run_command;
