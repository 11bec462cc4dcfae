//! Command-line interface
//!
//! `carelink serve` boots the HTTP gateway; `carelink check` resolves
//! configuration and prints it without binding a listener.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run_command;
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub async fn run() -> CliResult<()> {
    run_command(Cli::parse_args()).await
}
