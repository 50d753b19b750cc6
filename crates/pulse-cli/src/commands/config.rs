//! Config command implementations (show, path)

use std::path::Path;

use anyhow::{Context, Result};
use pulse_core::config::default_config_path;
use pulse_core::EngineConfig;

/// Load the engine config, from `--config` when given
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::load().context("Failed to load config")?,
    };
    Ok(config)
}

pub fn cmd_config_show(config: &EngineConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn cmd_config_path(override_path: Option<&Path>) -> Result<()> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().context("Could not determine data directory")?,
    };

    let state = if path.exists() {
        "exists"
    } else {
        "not found, using defaults"
    };
    println!("{} ({})", path.display(), state);
    Ok(())
}
