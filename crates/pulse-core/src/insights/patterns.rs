//! Pattern Detector
//!
//! Finds habitual spending in the expense feed:
//! - recurring (merchant, weekday) signatures
//! - the weekday with the most spend
//! - the average daily spend so far this month
//!
//! Highlights are always emitted in that fixed order, never re-ranked.

use std::collections::HashMap;

use crate::currency::CurrencyFormatter;
use crate::models::BudgetSummary;

use super::normalize::NormalizedFeed;

/// Highlight shown when there are no expenses to analyze
pub const NO_PATTERNS: &str = "No spending patterns yet. Add a few transactions to see AI insights.";

/// Maximum number of highlights returned
pub const MAX_HIGHLIGHTS: usize = 3;

/// Minimum repeats before a signature counts as a habit
const MIN_REPEATS: u32 = 2;

/// Aggregated spend for one merchant on one weekday
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantDaySignature {
    pub merchant: String,
    pub day: &'static str,
    pub total: f64,
    pub count: u32,
}

impl MerchantDaySignature {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Group dated expenses by (merchant, weekday), in first-seen order
pub fn merchant_day_signatures(feed: &NormalizedFeed<'_>) -> Vec<MerchantDaySignature> {
    let mut signatures: Vec<MerchantDaySignature> = Vec::new();
    let mut index: HashMap<(String, &'static str), usize> = HashMap::new();

    for entry in feed.expenses() {
        let Some(day) = entry.weekday() else {
            continue;
        };

        let key = (entry.merchant.clone(), day);
        let slot = *index.entry(key).or_insert_with(|| {
            signatures.push(MerchantDaySignature {
                merchant: entry.merchant.clone(),
                day,
                total: 0.0,
                count: 0,
            });
            signatures.len() - 1
        });

        signatures[slot].total += entry.tx.amount;
        signatures[slot].count += 1;
    }

    signatures
}

/// The most frequent repeated signature; ties go to the first seen
pub fn strongest_habit(signatures: &[MerchantDaySignature]) -> Option<&MerchantDaySignature> {
    signatures
        .iter()
        .filter(|s| s.count >= MIN_REPEATS)
        .fold(None, |best: Option<&MerchantDaySignature>, s| match best {
            Some(b) if b.count >= s.count => Some(b),
            _ => Some(s),
        })
}

/// Weekday with the largest total expense; ties go to the first seen
pub fn peak_weekday(feed: &NormalizedFeed<'_>) -> Option<(&'static str, f64)> {
    let mut totals: Vec<(&'static str, f64)> = Vec::new();

    for entry in feed.expenses() {
        let Some(day) = entry.weekday() else {
            continue;
        };
        match totals.iter_mut().find(|(d, _)| *d == day) {
            Some((_, total)) => *total += entry.tx.amount,
            None => totals.push((day, entry.tx.amount)),
        }
    }

    totals
        .into_iter()
        .fold(None, |best: Option<(&'static str, f64)>, cur| match best {
            Some(b) if b.1 >= cur.1 => Some(b),
            _ => Some(cur),
        })
}

/// Produces the pattern highlight sentences
pub struct PatternDetector<'f> {
    currency: &'f CurrencyFormatter,
}

impl<'f> PatternDetector<'f> {
    pub fn new(currency: &'f CurrencyFormatter) -> Self {
        Self { currency }
    }

    pub fn detect(
        &self,
        feed: &NormalizedFeed<'_>,
        summary: &BudgetSummary,
        day_of_month: u32,
    ) -> Vec<String> {
        if feed.expenses().next().is_none() {
            return vec![NO_PATTERNS.to_string()];
        }

        let mut highlights = Vec::new();

        let signatures = merchant_day_signatures(feed);
        if let Some(habit) = strongest_habit(&signatures) {
            tracing::debug!(
                merchant = %habit.merchant,
                day = habit.day,
                count = habit.count,
                "Recurring spend detected"
            );
            highlights.push(format!(
                "You often spend {} at {} on {}s.",
                self.currency.format(habit.average()),
                habit.merchant,
                habit.day
            ));
        }

        if let Some((day, total)) = peak_weekday(feed) {
            highlights.push(format!(
                "Your highest spending day is {} ({}).",
                day,
                self.currency.format(total)
            ));
        }

        let monthly_expenses = summary.monthly_expenses();
        if monthly_expenses != 0.0 {
            let daily_avg = monthly_expenses / day_of_month.max(1) as f64;
            highlights.push(format!(
                "Average daily spend this month: {}.",
                self.currency.format(daily_avg)
            ));
        }

        if highlights.is_empty() {
            // Expenses exist but none are dated and there is no monthly total
            return vec![NO_PATTERNS.to_string()];
        }

        highlights.truncate(MAX_HIGHLIGHTS);
        highlights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::normalize::{FeedNormalizer, ToneTable};
    use crate::models::Transaction;
    use crate::test_utils::{expense, income, ist};

    fn detect(txs: &[Transaction], summary: &BudgetSummary, day: u32) -> Vec<String> {
        let tones = ToneTable::builtin();
        let feed = FeedNormalizer::new(&tones, ist()).normalize(txs);
        let currency = CurrencyFormatter::default();
        PatternDetector::new(&currency).detect(&feed, summary, day)
    }

    #[test]
    fn test_no_expenses_is_terminal() {
        let txs = vec![income("salary", 50000.0, Some("2026-10-01"))];
        let summary = BudgetSummary {
            monthly_expenses: Some(3000.0),
            ..Default::default()
        };

        assert_eq!(detect(&txs, &summary, 10), vec![NO_PATTERNS.to_string()]);
        assert_eq!(detect(&[], &summary, 10), vec![NO_PATTERNS.to_string()]);
    }

    #[test]
    fn test_cafe_on_mondays() {
        let txs = vec![
            expense("a", 200.0, Some("Dining"), Some("Cafe"), Some("2026-10-12")),
            expense("b", 220.0, Some("Dining"), Some("Cafe"), Some("2026-10-05")),
        ];

        let highlights = detect(&txs, &BudgetSummary::default(), 17);
        assert_eq!(
            highlights,
            vec![
                "You often spend ₹210.00 at Cafe on Mondays.".to_string(),
                "Your highest spending day is Monday (₹420.00).".to_string(),
            ]
        );
    }

    #[test]
    fn test_single_visits_are_not_habits() {
        let txs = vec![
            expense("a", 200.0, Some("Dining"), Some("Cafe"), Some("2026-10-12")),
            expense("b", 90.0, Some("Dining"), Some("Cafe"), Some("2026-10-13")),
            expense("c", 500.0, Some("Groceries"), Some("Market"), Some("2026-10-12")),
        ];

        let highlights = detect(&txs, &BudgetSummary::default(), 17);
        assert_eq!(highlights.len(), 1);
        assert!(highlights[0].starts_with("Your highest spending day is Monday"));
    }

    #[test]
    fn test_habit_ties_prefer_first_seen() {
        let txs = vec![
            expense("a", 100.0, None, Some("Bakery"), Some("2026-10-14")),
            expense("b", 900.0, None, Some("Cinema"), Some("2026-10-16")),
            expense("c", 100.0, None, Some("Bakery"), Some("2026-10-07")),
            expense("d", 900.0, None, Some("Cinema"), Some("2026-10-09")),
        ];

        let highlights = detect(&txs, &BudgetSummary::default(), 17);
        assert_eq!(highlights[0], "You often spend ₹100.00 at Bakery on Wednesdays.");
        assert_eq!(highlights[1], "Your highest spending day is Friday (₹1,800.00).");
    }

    #[test]
    fn test_higher_count_wins_over_amount() {
        let tones = ToneTable::builtin();
        let txs = vec![
            expense("a", 1000.0, None, Some("Cinema"), Some("2026-10-16")),
            expense("b", 1000.0, None, Some("Cinema"), Some("2026-10-09")),
            expense("c", 10.0, None, Some("Tea"), Some("2026-10-13")),
            expense("d", 10.0, None, Some("Tea"), Some("2026-10-06")),
            expense("e", 10.0, None, Some("Tea"), Some("2026-09-29")),
        ];
        let feed = FeedNormalizer::new(&tones, ist()).normalize(&txs);
        let signatures = merchant_day_signatures(&feed);
        let habit = strongest_habit(&signatures).unwrap();

        assert_eq!(habit.merchant, "Tea");
        assert_eq!(habit.day, "Tuesday");
        assert_eq!(habit.count, 3);
    }

    #[test]
    fn test_daily_average_uses_day_of_month() {
        let txs = vec![expense("a", 50.0, None, Some("Cafe"), Some("2026-10-12"))];
        let summary = BudgetSummary {
            monthly_expenses: Some(3000.0),
            ..Default::default()
        };

        let highlights = detect(&txs, &summary, 10);
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[1], "Average daily spend this month: ₹300.00.");

        // Day zero never divides by zero
        let highlights = detect(&txs, &summary, 0);
        assert_eq!(highlights[1], "Average daily spend this month: ₹3,000.00.");
    }

    #[test]
    fn test_undated_expenses_only_feed_daily_average() {
        let txs = vec![
            expense("a", 50.0, None, Some("Cafe"), None),
            expense("b", 50.0, None, Some("Cafe"), None),
        ];

        assert_eq!(
            detect(&txs, &BudgetSummary::default(), 10),
            vec![NO_PATTERNS.to_string()]
        );

        let summary = BudgetSummary {
            monthly_expenses: Some(100.0),
            ..Default::default()
        };
        assert_eq!(
            detect(&txs, &summary, 10),
            vec!["Average daily spend this month: ₹10.00.".to_string()]
        );
    }
}
