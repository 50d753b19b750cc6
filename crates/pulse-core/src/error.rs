//! Error types for Pulse
//!
//! The analysis engine itself never fails: bad records are skipped and
//! reported in the report. These errors cover the fallible edges around it
//! (loading config, parsing snapshots).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
