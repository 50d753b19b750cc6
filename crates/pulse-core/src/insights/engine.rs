//! Insight Engine - orchestrates the analysis stages into one report

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{
    BudgetSummary, CategorySpending, DashboardSnapshot, RejectedRecord, SavingsGoal, Transaction,
    TransactionFeed,
};

use super::forecast::ForecastProjector;
use super::health::HealthClassifier;
use super::normalize::{FeedNormalizer, ToneTable};
use super::patterns::PatternDetector;
use super::recommendations::RecommendationGenerator;
use super::tagging::{confidence_score, TaggingScorer};
use super::types::{InsightReport, SkipReason, SkippedRecord};

/// Caller-supplied snapshot for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightInput {
    /// Newest first, as served by the transaction listing
    pub transactions: Vec<Transaction>,
    pub summary: BudgetSummary,
    pub goals: Vec<SavingsGoal>,
    /// Sorted descending by amount
    pub category_spending: Vec<CategorySpending>,
    /// Feed elements that failed to parse, in feed order
    #[serde(skip)]
    pub rejected: Vec<RejectedRecord>,
}

impl InsightInput {
    /// Combine the transaction listing with the dashboard summary payload
    pub fn new(transactions: Vec<Transaction>, snapshot: DashboardSnapshot) -> Self {
        Self {
            transactions,
            summary: snapshot.stats,
            goals: snapshot.savings_goals,
            category_spending: snapshot.category_spending,
            rejected: Vec::new(),
        }
    }

    /// Like [`InsightInput::new`], keeping the feed's unreadable records
    /// so they surface in the report
    pub fn from_feed(feed: TransactionFeed, snapshot: DashboardSnapshot) -> Self {
        let (transactions, rejected) = feed.into_parts();
        Self {
            rejected,
            ..Self::new(transactions, snapshot)
        }
    }

    /// Parse the raw transaction listing and dashboard summary payloads
    pub fn from_json(transactions: &str, summary: &str) -> Result<Self> {
        let feed: TransactionFeed = serde_json::from_str(transactions)?;
        let snapshot: DashboardSnapshot = serde_json::from_str(summary)?;
        Ok(Self::from_feed(feed, snapshot))
    }
}

/// Map a position in the parsed transaction list back to the raw feed.
///
/// `rejected` must be in ascending index order.
fn feed_position(position: usize, rejected: &[RejectedRecord]) -> usize {
    let mut index = position;
    for record in rejected {
        if record.index <= index {
            index += 1;
        } else {
            break;
        }
    }
    index
}

/// Parse rejects and normalizer skips as one list, in feed order
fn merge_skipped(rejected: &[RejectedRecord], normalized: Vec<SkippedRecord>) -> Vec<SkippedRecord> {
    let mut skipped: Vec<SkippedRecord> = rejected
        .iter()
        .map(|r| SkippedRecord {
            index: r.index,
            id: r.id.clone(),
            reason: SkipReason::Malformed,
            detail: Some(r.error.clone()),
        })
        .collect();

    skipped.extend(normalized.into_iter().map(|record| SkippedRecord {
        index: feed_position(record.index, rejected),
        ..record
    }));
    skipped.sort_by_key(|record| record.index);
    skipped
}

/// The main insight engine.
///
/// Holds only immutable configuration, so one engine can serve any number
/// of concurrent callers.
pub struct InsightEngine {
    config: EngineConfig,
    tones: ToneTable,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl InsightEngine {
    pub fn new(config: EngineConfig) -> Self {
        let tones = ToneTable::with_extra(&config.extra_tones);
        Self { config, tones }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze with the current local time
    pub fn analyze_now(&self, input: &InsightInput) -> InsightReport {
        self.analyze(input, Local::now().fixed_offset())
    }

    /// Run every stage against one snapshot.
    ///
    /// `now` is the only clock any stage sees; its offset is the user's local
    /// timezone for weekday bucketing. The same inputs and `now` always give
    /// the same report.
    pub fn analyze(&self, input: &InsightInput, now: DateTime<FixedOffset>) -> InsightReport {
        let currency = &self.config.currency;
        let today = now.date_naive();

        let feed = FeedNormalizer::new(&self.tones, *now.offset()).normalize(&input.transactions);

        let forecast = ForecastProjector::new(currency).project(&input.summary, today);
        let highlights =
            PatternDetector::new(currency).detect(&feed, &input.summary, forecast.day_of_month);
        let score = confidence_score(&feed);
        let auto_tagged = TaggingScorer::new(currency).auto_tag(&feed, score);

        let pulse = HealthClassifier::new(self.config.health).evaluate(&input.summary);

        let recs = RecommendationGenerator::new(currency, self.config.savings_cut_percent)
            .generate(
                &input.summary,
                &input.goals,
                &input.category_spending,
                &forecast,
            );

        tracing::debug!(
            transactions = input.transactions.len(),
            skipped = feed.skipped.len() + input.rejected.len(),
            highlights = highlights.len(),
            pulse = pulse.status.as_str(),
            "Insight analysis complete"
        );

        InsightReport {
            generated_for: now.to_rfc3339(),
            vital_signs: recs.vital_signs,
            pattern_highlights: highlights,
            auto_tagged,
            confidence_score: score,
            pulse,
            forecast,
            snapshot: recs.snapshot,
            opportunity_items: recs.opportunity_items,
            priority_action: recs.priority_action,
            scenarios: recs.scenarios,
            progress_trackers: recs.progress_trackers,
            skipped: merge_skipped(&input.rejected, feed.skipped),
        }
    }
}
