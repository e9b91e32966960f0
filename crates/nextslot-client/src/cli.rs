//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use nextslot_core::OutputFormat;

/// nextslot - When does each recurring meeting happen next
#[derive(Debug, Parser)]
#[command(name = "nextslot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NEXTSLOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the next occurrence of every meeting in a JSON file
    Resolve(ResolveArgs),

    /// Print the end time of an occurrence
    EndTime {
        /// Start time (HH:MM:SS)
        start: String,

        /// Duration in minutes
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `nextslot resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// JSON file holding one meeting record or an array of them ("-" reads stdin)
    pub file: PathBuf,

    /// Reference instant in local time (YYYY-MM-DDTHH:MM[:SS]), defaults to now
    #[arg(long)]
    pub now: Option<String>,

    /// Grace margin in minutes after each occurrence
    #[arg(long, allow_negative_numbers = true)]
    pub margin: Option<i64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Maximum meeting name length (truncated with ellipsis)
    #[arg(long)]
    pub max_name_length: Option<usize>,
}

impl ResolveArgs {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
    /// Check the configuration for errors
    Validate,
    /// Show the configuration file path
    Path,
}
