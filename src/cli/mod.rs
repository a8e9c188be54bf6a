//! CLI module
//!
//! This module contains the binary's front end:
//! - `args` - clap definitions of the global options and one subcommand per ledger operation
//! - `commands` - Loading the dump directory, running one command and saving it back

mod args;
mod commands;

pub use args::{CliArgs, Command};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing command, or --help), clap
/// displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
