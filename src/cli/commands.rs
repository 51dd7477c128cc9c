//! CLI command definitions using clap
//!
//! Defines the command structure for the `pscout` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagescout - terminal client for page extraction backends
///
/// Run without arguments to launch the TUI mode.
#[derive(Parser, Debug)]
#[command(name = "pscout", version, about, long_about = None)]
pub struct Cli {
    /// Backend server URL (overrides the configured one)
    #[arg(long, global = true, env = "PAGESCOUT_SERVER")]
    pub server: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a page and print its extracted content
    Fetch {
        /// Page URL to fetch
        url: String,

        /// Print the raw JSON response instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Fetch and summarize a page in one backend operation
    Autopilot {
        /// Page URL to process
        url: String,

        /// Print the raw JSON response instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Summarize free text from a file or stdin
    Summarize {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,

        /// Print the raw JSON response instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config(ConfigArgs),
}

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show a configuration value
    Get {
        /// One of: server-url, timeout-secs, link-display-cap
        key: String,
    },
    /// Set a configuration value
    Set {
        /// One of: server-url, timeout-secs, link-display-cap
        key: String,
        value: String,
    },
    /// Print the configuration file path
    Path,
}
