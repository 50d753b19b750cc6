//! Pulse CLI - Behavioral financial analytics
//!
//! Usage:
//!   pulse analyze --transactions tx.json --summary summary.json
//!   pulse analyze -t tx.json -s summary.json --format text --now 2026-10-17
//!   pulse config show         Print effective configuration
//!   pulse config path         Print override location

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Analyze {
            transactions,
            summary,
            now,
            format,
            pretty,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_analyze(
                config,
                &transactions,
                &summary,
                now.as_deref(),
                format,
                pretty,
            )
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = commands::load_config(cli.config.as_deref())?;
                commands::cmd_config_show(&config)
            }
            ConfigAction::Path => commands::cmd_config_path(cli.config.as_deref()),
        },
    }
}
