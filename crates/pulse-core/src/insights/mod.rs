//! Insight Engine - Behavioral Financial Analytics
//!
//! Turns a transaction history plus a budget/goal snapshot into derived
//! insight. Every run is a pure function of its inputs and an injected "now":
//! no I/O, no persistence, nothing cached between calls.
//!
//! ## Stages
//!
//! - **Feed Normalizer** - merchant labels, category tones, local dates
//! - **Pattern Detector** - recurring (merchant, weekday) spend, peak day
//! - **Forecast Projector** - month-end projection from the burn rate
//! - **Tagging Scorer** - categorization confidence
//! - **Health Classifier** - Healthy / Watchful / Needs Attention
//! - **Recommendation Generator** - cuts, scenarios, goal progress, vital signs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::insights::{InsightEngine, InsightInput};
//!
//! let engine = InsightEngine::new(EngineConfig::load()?);
//! let input = InsightInput::new(transactions, snapshot);
//! let report = engine.analyze(&input, now);
//! ```

pub mod engine;
pub mod forecast;
pub mod health;
pub mod normalize;
pub mod patterns;
pub mod recommendations;
pub mod tagging;
pub mod types;

pub use engine::{InsightEngine, InsightInput};
pub use forecast::ForecastProjector;
pub use health::HealthClassifier;
pub use normalize::{FeedEntry, FeedNormalizer, NormalizedFeed, ToneTable};
pub use patterns::{MerchantDaySignature, PatternDetector};
pub use recommendations::{RecommendationGenerator, Recommendations};
pub use tagging::TaggingScorer;
pub use types::{
    AutoTaggedTransaction, Forecast, InsightReport, OpportunityItem, PriorityAction,
    ProgressTracker, Pulse, PulseStatus, PulseTone, Scenario, ScenarioTone, SkipReason,
    SkippedRecord, Snapshot, Tone, Trend, VitalSign, VitalSignId,
};
