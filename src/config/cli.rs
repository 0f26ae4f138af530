//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::defaults;

/// erp-relay: forward JSON payloads to configured ERP endpoints
///
/// Resolves per-endpoint settings from a configuration file, sends a single
/// POST request, and prints the normalized result as JSON.
#[derive(Debug, Parser)]
#[command(name = "erp-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Top-level namespace of every configuration key
    #[arg(long, global = true, default_value = defaults::NAMESPACE)]
    pub namespace: String,

    /// Override a setting as 'path/to/key=value' (can be specified multiple times)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for erp-relay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a payload to an endpoint
    Send(SendArgs),

    /// Print the resolved settings of an endpoint
    Describe {
        /// Endpoint type to describe
        #[arg(long, short)]
        endpoint: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Arguments of the `send` subcommand.
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Endpoint type to send to
    #[arg(long, short)]
    pub endpoint: String,

    /// Payload given inline as JSON text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub data: Option<String>,

    /// Payload read from a JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
