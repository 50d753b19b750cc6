//! Pulse Core Library
//!
//! Behavioral financial analytics for the Pulse finance tracker:
//! - Input models for the transaction feed and dashboard snapshot
//! - Insight engine (patterns, forecast, confidence, health, recommendations)
//! - Locale-aware currency formatting
//! - TOML configuration with embedded defaults

pub mod config;
pub mod currency;
pub mod error;
pub mod insights;
pub mod models;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{EngineConfig, HealthThresholds};
pub use currency::{CurrencyFormatter, Grouping, MAX_DECIMALS};
pub use error::{Error, Result};
pub use insights::{InsightEngine, InsightInput, InsightReport, PulseStatus};
pub use models::{
    BudgetSummary, CategorySpending, DashboardSnapshot, RejectedRecord, SavingsGoal, Transaction,
    TransactionFeed, TransactionKind,
};
