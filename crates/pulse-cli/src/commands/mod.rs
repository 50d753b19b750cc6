//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Run the insight engine over JSON snapshots
//! - `config` - Show the effective config and its override path

pub mod analyze;
pub mod config;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
