//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;

/// Record access demo against a DynamoDB table.
#[derive(Debug, Parser)]
#[command(name = "tablekit")]
#[command(version, about = "Record access demo against a DynamoDB table", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short)]
    pub verbose: bool,

    /// Operation to run. Runs the full demo when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run, falling back to the demo.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output, one document per result.
    Json,
    /// Human-readable log lines.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run every operation in order, stopping at the first failure.
    Demo,
    /// List table names.
    Tables {
        /// Maximum number of names; defaults to --list-limit.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Scan the configured table (first page only).
    Scan,
    /// Fetch the record whose key attribute equals VALUE.
    Get { value: String },
    /// Write a record given as name=value assignments.
    Put {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Write several records in one request.
    BatchPut {
        /// A record as comma-separated name=value assignments. Repeatable.
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },
    /// Delete the record whose key attribute equals VALUE.
    Delete { value: String },
}
