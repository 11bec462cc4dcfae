//! CLI argument definitions using clap
//!
//! Commands:
//! - carelink serve [--config <path>]
//! - carelink check [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Carelink - care-coordination CRUD request handlers
#[derive(Parser, Debug)]
#[command(name = "carelink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Path to a JSON configuration file; the environment is used when absent
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Resolve configuration and print it with credentials redacted
    Check {
        /// Path to a JSON configuration file; the environment is used when absent
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
