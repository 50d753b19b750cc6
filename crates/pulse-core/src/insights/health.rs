//! Health Classifier
//!
//! Maps the budget-used percentage onto a three-tier pulse. Thresholds are
//! inclusive on their lower bound.

use crate::config::HealthThresholds;
use crate::models::BudgetSummary;

use super::types::{Pulse, PulseStatus};

pub fn classify(budget_used_percentage: f64, thresholds: &HealthThresholds) -> PulseStatus {
    let used = if budget_used_percentage.is_nan() {
        0.0
    } else {
        budget_used_percentage
    };

    if used >= thresholds.attention_at {
        PulseStatus::NeedsAttention
    } else if used >= thresholds.watchful_at {
        PulseStatus::Watchful
    } else {
        PulseStatus::Healthy
    }
}

pub struct HealthClassifier {
    thresholds: HealthThresholds,
}

impl HealthClassifier {
    pub fn new(thresholds: HealthThresholds) -> Self {
        Self { thresholds }
    }

    pub fn evaluate(&self, summary: &BudgetSummary) -> Pulse {
        let used = summary.budget_used_percentage();
        let status = classify(used, &self.thresholds);

        tracing::debug!(used, status = status.as_str(), "Pulse classified");

        Pulse {
            status,
            label: status.label().to_string(),
            message: status.message().to_string(),
            tone: status.tone(),
            budget_used_percentage: used,
        }
    }
}

impl Default for HealthClassifier {
    fn default() -> Self {
        Self::new(HealthThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::PulseTone;

    #[test]
    fn test_thresholds_are_inclusive_lower() {
        let t = HealthThresholds::default();
        assert_eq!(classify(95.0, &t), PulseStatus::NeedsAttention);
        assert_eq!(classify(90.0, &t), PulseStatus::NeedsAttention);
        assert_eq!(classify(89.99, &t), PulseStatus::Watchful);
        assert_eq!(classify(70.0, &t), PulseStatus::Watchful);
        assert_eq!(classify(69.9, &t), PulseStatus::Healthy);
        assert_eq!(classify(0.0, &t), PulseStatus::Healthy);
        assert_eq!(classify(-10.0, &t), PulseStatus::Healthy);
        assert_eq!(classify(f64::NAN, &t), PulseStatus::Healthy);
    }

    #[test]
    fn test_missing_percentage_is_healthy() {
        let pulse = HealthClassifier::default().evaluate(&BudgetSummary::default());
        assert_eq!(pulse.status, PulseStatus::Healthy);
        assert_eq!(pulse.message, "Spending is on pace with your budget.");
        assert_eq!(pulse.tone, PulseTone::Healthy);
        assert_eq!(pulse.budget_used_percentage, 0.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = HealthClassifier::new(HealthThresholds {
            watchful_at: 50.0,
            attention_at: 80.0,
        });
        let summary = BudgetSummary {
            budget_used_percentage: Some(85.0),
            ..Default::default()
        };

        let pulse = classifier.evaluate(&summary);
        assert_eq!(pulse.status, PulseStatus::NeedsAttention);
        assert_eq!(pulse.label, "Needs Attention");
        assert_eq!(pulse.tone, PulseTone::Danger);
    }
}
