//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, else
//!    ~/.local/share/pulse/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Every key in the file is optional; missing keys keep their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::currency::{CurrencyFormatter, Grouping, MAX_DECIMALS};
use crate::error::{Error, Result};
use crate::insights::types::Tone;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Budget-used thresholds for the pulse classifier (inclusive-lower)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    pub watchful_at: f64,
    pub attention_at: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            watchful_at: 70.0,
            attention_at: 90.0,
        }
    }
}

/// Effective engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub currency: CurrencyFormatter,
    pub health: HealthThresholds,
    /// Flat cut suggested for the top spending category
    pub savings_cut_percent: f64,
    /// Keyword -> tone entries layered over the built-in tone table
    pub extra_tones: BTreeMap<String, Tone>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormatter::default(),
            health: HealthThresholds::default(),
            savings_cut_percent: 10.0,
            extra_tones: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load from the default override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path; a missing file falls back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("insights.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    currency: Option<RawCurrency>,
    health: Option<RawHealth>,
    recommendations: Option<RawRecommendations>,
    tones: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    code: Option<String>,
    symbol: Option<String>,
    grouping: Option<String>,
    decimals: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    watchful_at: Option<f64>,
    attention_at: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendations {
    savings_cut_percent: Option<f64>,
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(currency) = raw.currency {
        if let Some(code) = currency.code {
            config.currency.code = code;
        }
        if let Some(symbol) = currency.symbol {
            config.currency.symbol = symbol;
        }
        if let Some(grouping) = currency.grouping {
            config.currency.grouping = grouping.parse::<Grouping>().map_err(Error::Config)?;
        }
        if let Some(decimals) = currency.decimals {
            if decimals > MAX_DECIMALS {
                return Err(Error::Config(format!(
                    "currency.decimals must be at most {}, got {}",
                    MAX_DECIMALS, decimals
                )));
            }
            config.currency.decimals = decimals;
        }
    }

    if let Some(health) = raw.health {
        if let Some(watchful) = health.watchful_at {
            config.health.watchful_at = watchful;
        }
        if let Some(attention) = health.attention_at {
            config.health.attention_at = attention;
        }
    }
    let HealthThresholds {
        watchful_at,
        attention_at,
    } = config.health;
    if !watchful_at.is_finite() || !attention_at.is_finite() || attention_at < watchful_at {
        return Err(Error::Config(format!(
            "health.attention_at ({}) must be a number >= health.watchful_at ({})",
            attention_at, watchful_at
        )));
    }

    if let Some(recommendations) = raw.recommendations {
        if let Some(cut) = recommendations.savings_cut_percent {
            if !(0.0..=100.0).contains(&cut) {
                return Err(Error::Config(format!(
                    "recommendations.savings_cut_percent must be within 0-100, got {}",
                    cut
                )));
            }
            config.savings_cut_percent = cut;
        }
    }

    if let Some(tones) = raw.tones {
        for (keyword, tone) in tones {
            let tone = tone.parse::<Tone>().map_err(Error::Config)?;
            config.extra_tones.insert(keyword.to_lowercase(), tone);
        }
    }

    Ok(config)
}
