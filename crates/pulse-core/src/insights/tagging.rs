//! Tagging & Confidence Scorer
//!
//! The aggregate score is the share of transactions that carry a category.
//! Per-transaction confidence is a two-branch heuristic around it: tagged
//! transactions sit in 70..=95, untagged ones drop 20 points with a floor
//! of 50.

use crate::currency::CurrencyFormatter;
use crate::models::UNCATEGORIZED;

use super::normalize::{FeedEntry, NormalizedFeed};
use super::types::AutoTaggedTransaction;

/// How many of the most recent transactions get a confidence badge
pub const AUTO_TAGGED_LIMIT: usize = 4;

const TAGGED_FLOOR: f64 = 70.0;
const TAGGED_CEILING: f64 = 95.0;
const TAGGED_FALLBACK: f64 = 80.0;
const UNTAGGED_FLOOR: f64 = 50.0;
const UNTAGGED_FALLBACK: f64 = 70.0;
const UNTAGGED_PENALTY: f64 = 20.0;

/// Percent of transactions with a category, `None` when there are none.
///
/// "No data" and "0% confidence" are different answers; callers must not
/// collapse `None` into zero.
pub fn confidence_score(feed: &NormalizedFeed<'_>) -> Option<u32> {
    if feed.is_empty() {
        return None;
    }
    let with_category = feed
        .entries
        .iter()
        .filter(|e| e.tx.category().is_some())
        .count();
    Some((100.0 * with_category as f64 / feed.len() as f64).round() as u32)
}

/// Confidence for a single transaction given the aggregate score
pub fn transaction_confidence(category: Option<&str>, score: Option<u32>) -> u32 {
    let tagged = matches!(category, Some(c) if c != UNCATEGORIZED);
    let value = if tagged {
        score
            .map(f64::from)
            .unwrap_or(TAGGED_FALLBACK)
            .round()
            .clamp(TAGGED_FLOOR, TAGGED_CEILING)
    } else {
        (score.map(f64::from).unwrap_or(UNTAGGED_FALLBACK) - UNTAGGED_PENALTY)
            .round()
            .max(UNTAGGED_FLOOR)
    };
    value as u32
}

/// Payment method, else description, else category, else "N/A"
fn display_code(entry: &FeedEntry<'_>) -> String {
    entry
        .tx
        .payment_method()
        .or_else(|| entry.tx.description())
        .or_else(|| entry.tx.category())
        .unwrap_or("N/A")
        .to_string()
}

pub struct TaggingScorer<'f> {
    currency: &'f CurrencyFormatter,
}

impl<'f> TaggingScorer<'f> {
    pub fn new(currency: &'f CurrencyFormatter) -> Self {
        Self { currency }
    }

    /// Score the first few entries; input is assumed newest-first
    pub fn auto_tag(
        &self,
        feed: &NormalizedFeed<'_>,
        score: Option<u32>,
    ) -> Vec<AutoTaggedTransaction> {
        feed.entries
            .iter()
            .take(AUTO_TAGGED_LIMIT)
            .map(|entry| AutoTaggedTransaction {
                id: entry.tx.id.clone(),
                merchant: entry.merchant.clone(),
                code: display_code(entry),
                amount: entry.tx.amount,
                amount_formatted: self.currency.format(entry.tx.amount),
                category: entry.category.to_string(),
                tone: entry.tone,
                confidence: transaction_confidence(Some(entry.category), score),
            })
            .collect()
    }
}
