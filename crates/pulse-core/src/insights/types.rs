//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display tone of a spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Emerald,
    Rose,
    Violet,
    Sky,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Emerald => "emerald",
            Tone::Rose => "rose",
            Tone::Violet => "violet",
            Tone::Sky => "sky",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emerald" => Ok(Tone::Emerald),
            "rose" => Ok(Tone::Rose),
            "violet" => Ok(Tone::Violet),
            "sky" => Ok(Tone::Sky),
            _ => Err(format!("Unknown tone: {}", s)),
        }
    }
}

/// Three-tier budget health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseStatus {
    Healthy,
    Watchful,
    NeedsAttention,
}

impl PulseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PulseStatus::Healthy => "Healthy",
            PulseStatus::Watchful => "Watchful",
            PulseStatus::NeedsAttention => "NeedsAttention",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PulseStatus::Healthy => "Healthy",
            PulseStatus::Watchful => "Watchful",
            PulseStatus::NeedsAttention => "Needs Attention",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PulseStatus::Healthy => "Spending is on pace with your budget.",
            PulseStatus::Watchful => "You are approaching your budget limits.",
            PulseStatus::NeedsAttention => "Spending is above your budget pace.",
        }
    }

    pub fn tone(&self) -> PulseTone {
        match self {
            PulseStatus::Healthy => PulseTone::Healthy,
            PulseStatus::Watchful => PulseTone::Warning,
            PulseStatus::NeedsAttention => PulseTone::Danger,
        }
    }
}

impl fmt::Display for PulseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PulseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healthy" => Ok(PulseStatus::Healthy),
            "Watchful" => Ok(PulseStatus::Watchful),
            "NeedsAttention" | "Needs Attention" => Ok(PulseStatus::NeedsAttention),
            _ => Err(format!("Unknown pulse status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseTone {
    Healthy,
    Warning,
    Danger,
}

/// Direction of a vital sign's trend arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn from_rising(rising: bool) -> Self {
        if rising {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Fixed identities of the four vital sign cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSignId {
    Available,
    Burn,
    Income,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioTone {
    Dark,
    Success,
}

/// Why a transaction was dropped from the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Record did not have the transaction shape (bad type, null amount...)
    Malformed,
    NegativeAmount,
    NonFiniteAmount,
    MalformedDate,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Malformed => "malformed",
            SkipReason::NegativeAmount => "negative_amount",
            SkipReason::NonFiniteAmount => "non_finite_amount",
            SkipReason::MalformedDate => "malformed_date",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction excluded from aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    /// Position in the input feed
    pub index: usize,
    pub id: String,
    pub reason: SkipReason,
    /// Parse error for malformed records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// One of the four summary metric cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSign {
    pub id: VitalSignId,
    pub label: String,
    pub amount: f64,
    pub value: String,
    pub delta: String,
    pub trend: Trend,
}

/// A recent transaction with its categorization confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTaggedTransaction {
    pub id: String,
    pub merchant: String,
    /// Payment method, else description, else category, else "N/A"
    pub code: String,
    pub amount: f64,
    pub amount_formatted: String,
    pub category: String,
    pub tone: Tone,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pulse {
    pub status: PulseStatus,
    pub label: String,
    pub message: String,
    pub tone: PulseTone,
    pub budget_used_percentage: f64,
}

/// Month-end projection from the current burn rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub daily_burn: f64,
    pub projected_spend: f64,
    /// `None` when no budget is set
    pub overspend: Option<f64>,
    pub days_in_month: u32,
    pub day_of_month: u32,
    /// Midpoint marker on the forecast bar
    pub milestone_day: u32,
    /// Forecast bar fill, 0-100
    pub fill_percent: f64,
    pub warning: String,
    pub daily_burn_formatted: String,
    pub projected_spend_formatted: String,
    pub overspend_formatted: Option<String>,
}

/// Available funds against monthly goal commitments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub available: f64,
    pub committed: f64,
    pub available_percent: f64,
    pub available_formatted: String,
    pub committed_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityItem {
    pub id: u32,
    pub label: String,
    pub savings: f64,
    pub savings_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAction {
    pub title: String,
    pub detail: String,
    pub impact: String,
    pub category: String,
    pub current_spend: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: u32,
    pub title: String,
    pub detail: String,
    pub tone: ScenarioTone,
    /// Projected spend or estimated savings behind the detail text
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTracker {
    pub id: String,
    pub label: String,
    pub impact: String,
    pub target_amount: f64,
    /// Percent complete, 0-100
    pub progress: u32,
}

/// Everything the engine derives from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    /// The sampled "now" every stage used (RFC 3339)
    pub generated_for: String,
    pub vital_signs: Vec<VitalSign>,
    pub pattern_highlights: Vec<String>,
    pub auto_tagged: Vec<AutoTaggedTransaction>,
    pub confidence_score: Option<u32>,
    pub pulse: Pulse,
    pub forecast: Forecast,
    pub snapshot: Snapshot,
    pub opportunity_items: Vec<OpportunityItem>,
    pub priority_action: Option<PriorityAction>,
    pub scenarios: Vec<Scenario>,
    pub progress_trackers: Vec<ProgressTracker>,
    pub skipped: Vec<SkippedRecord>,
}

impl InsightReport {
    pub fn pulse_status(&self) -> PulseStatus {
        self.pulse.status
    }
}
