//! CLI argument definitions using clap
//!
//! Commands:
//! - contacts-api serve [--config <path>] [--host <host>] [--port <port>] [--database-url <url>]
//! - contacts-api init [--config <path>] [--database-url <url>]
//! - contacts-api stats [--config <path>] [--database-url <url>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// contacts-api - JSON CRUD service for contacts
#[derive(Parser, Debug)]
#[command(name = "contacts-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database URL, e.g. sqlite://contacts.db or sqlite://:memory:
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create the contact table and exit
    Init {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the number of stored contacts and exit
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Command {
    /// Configuration file named on the command line, if any
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Serve { common, .. }
            | Command::Init { common }
            | Command::Stats { common } => common.config.as_ref(),
        }
    }

    /// Flag values that override the configuration
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Serve { common, host, port } => ConfigOverrides {
                host: host.clone(),
                port: *port,
                database_url: common.database_url.clone(),
            },
            Command::Init { common } | Command::Stats { common } => ConfigOverrides {
                database_url: common.database_url.clone(),
                ..Default::default()
            },
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "contacts-api",
            "serve",
            "--port",
            "9000",
            "--database-url",
            "sqlite://:memory:",
        ])
        .unwrap();

        let overrides = cli.command.overrides();
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.host, None);
        assert_eq!(overrides.database_url.as_deref(), Some("sqlite://:memory:"));
        assert!(cli.command.config_path().is_none());
    }

    #[test]
    fn test_parse_init_with_config() {
        let cli = Cli::try_parse_from(["contacts-api", "init", "--config", "./contacts.json"])
            .unwrap();
        assert_eq!(
            cli.command.config_path(),
            Some(&PathBuf::from("./contacts.json"))
        );
        assert_eq!(cli.command.overrides().port, None);
    }

    #[test]
    fn test_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["contacts-api", "migrate"]).is_err());
    }
}
