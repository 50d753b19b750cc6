//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Pulse - Behavioral insight for your spending
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Behavioral financial analytics for transaction snapshots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a transaction feed against a dashboard snapshot
    Analyze {
        /// Transactions JSON (bare array or {"transactions": [...]})
        #[arg(short, long)]
        transactions: PathBuf,

        /// Dashboard summary JSON (stats, savingsGoals, categorySpending)
        #[arg(short, long)]
        summary: PathBuf,

        /// Reference time (RFC 3339 or YYYY-MM-DD in local time; defaults to now)
        #[arg(long)]
        now: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Inspect engine configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config override location
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable report
    Json,
    /// Human-readable dashboard
    Text,
}
