//! CLI module for contacts-api
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP service
//! - init: Create the contact table
//! - stats: Report how many contacts are stored

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, CommonArgs};
pub use commands::{init, run_command, serve, stats};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;

/// Parse the process arguments and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command).await
}
