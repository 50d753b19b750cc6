//! Recommendation Generator
//!
//! Derives the action-oriented parts of the report from the top spending
//! category, the forecast and the savings goals:
//! - a flat-percentage cut on the top category (opportunity + priority action)
//! - two "what if" scenarios
//! - goal progress trackers
//! - the four vital sign cards and the available-vs-committed snapshot

use crate::currency::CurrencyFormatter;
use crate::models::{BudgetSummary, CategorySpending, SavingsGoal};

use super::types::{
    Forecast, OpportunityItem, PriorityAction, ProgressTracker, Scenario, ScenarioTone, Snapshot,
    Trend, VitalSign, VitalSignId,
};

/// Goals shown as progress trackers
pub const PROGRESS_TRACKER_LIMIT: usize = 3;

/// Everything the generator derives in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub vital_signs: Vec<VitalSign>,
    pub snapshot: Snapshot,
    pub opportunity_items: Vec<OpportunityItem>,
    pub priority_action: Option<PriorityAction>,
    pub scenarios: Vec<Scenario>,
    pub progress_trackers: Vec<ProgressTracker>,
}

/// Sum of monthly contributions across all goals
pub fn total_monthly_contribution(goals: &[SavingsGoal]) -> f64 {
    goals
        .iter()
        .map(|g| g.monthly_contribution)
        .filter(|c| c.is_finite())
        .sum()
}

/// Goal completion percent, clamped to 0..=100.
///
/// A non-zero precomputed `progress` wins; otherwise current over target,
/// and zero when there is no usable target.
pub fn goal_progress(goal: &SavingsGoal) -> u32 {
    let raw = match goal.progress.filter(|p| p.is_finite() && *p != 0.0) {
        Some(progress) => progress,
        None => match goal.target_amount.filter(|t| t.is_finite() && *t > 0.0) {
            Some(target) => 100.0 * goal.current_amount / target,
            None => 0.0,
        },
    };

    if raw.is_finite() {
        raw.round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

/// "+12%", "-5%", "0%"
fn trend_delta(expense_trend: f64) -> String {
    if expense_trend == 0.0 {
        "0%".to_string()
    } else if expense_trend > 0.0 {
        format!("+{}%", expense_trend)
    } else {
        format!("{}%", expense_trend)
    }
}

pub struct RecommendationGenerator<'f> {
    currency: &'f CurrencyFormatter,
    /// Cut suggested for the top category, in percent
    cut_percent: f64,
}

impl<'f> RecommendationGenerator<'f> {
    pub fn new(currency: &'f CurrencyFormatter, cut_percent: f64) -> Self {
        Self {
            currency,
            cut_percent,
        }
    }

    fn savings_for(&self, category: &CategorySpending) -> f64 {
        category.amount * self.cut_percent / 100.0
    }

    pub fn generate(
        &self,
        summary: &BudgetSummary,
        goals: &[SavingsGoal],
        category_spending: &[CategorySpending],
        forecast: &Forecast,
    ) -> Recommendations {
        let top_category = category_spending.first();
        let committed = total_monthly_contribution(goals);

        if let Some(top) = top_category {
            tracing::debug!(
                category = %top.name,
                amount = top.amount,
                "Top spending category"
            );
        }

        Recommendations {
            vital_signs: self.vital_signs(summary, forecast, committed),
            snapshot: self.snapshot(summary.available_now(), committed),
            opportunity_items: top_category
                .map(|top| vec![self.opportunity(top)])
                .unwrap_or_default(),
            priority_action: top_category.map(|top| self.priority_action(top)),
            scenarios: self.scenarios(top_category, forecast),
            progress_trackers: self.progress_trackers(goals),
        }
    }

    pub fn opportunity(&self, top: &CategorySpending) -> OpportunityItem {
        let savings = self.savings_for(top);
        OpportunityItem {
            id: 1,
            label: format!("Cut {} by {}%", top.name, self.cut_percent),
            savings,
            savings_formatted: self.currency.format(savings),
        }
    }

    pub fn priority_action(&self, top: &CategorySpending) -> PriorityAction {
        let savings = self.savings_for(top);
        PriorityAction {
            title: format!("Reduce {} spend", top.name),
            detail: format!(
                "You are already at {} in {} this month.",
                self.currency.format(top.amount),
                top.name
            ),
            impact: format!("Save {}", self.currency.format(savings)),
            category: top.name.clone(),
            current_spend: top.amount,
            savings,
        }
    }

    /// Always two scenarios: stay the course, then adjust (or set a budget)
    pub fn scenarios(
        &self,
        top_category: Option<&CategorySpending>,
        forecast: &Forecast,
    ) -> Vec<Scenario> {
        let keep_going = Scenario {
            id: 1,
            title: "If you continue".to_string(),
            detail: format!(
                "Spending hits {} by month-end.",
                self.currency.format(forecast.projected_spend)
            ),
            tone: ScenarioTone::Dark,
            amount: Some(forecast.projected_spend),
        };

        let adjust = match top_category {
            Some(top) => {
                let savings = self.savings_for(top);
                Scenario {
                    id: 2,
                    title: format!("If you adjust {}", top.name),
                    detail: format!(
                        "Save about {} this month.",
                        self.currency.format(savings)
                    ),
                    tone: ScenarioTone::Success,
                    amount: Some(savings),
                }
            }
            None => Scenario {
                id: 2,
                title: "If you set a budget".to_string(),
                detail: "Create a budget to unlock projections.".to_string(),
                tone: ScenarioTone::Success,
                amount: None,
            },
        };

        vec![keep_going, adjust]
    }

    pub fn progress_trackers(&self, goals: &[SavingsGoal]) -> Vec<ProgressTracker> {
        goals
            .iter()
            .take(PROGRESS_TRACKER_LIMIT)
            .map(|goal| {
                let target = goal.target_amount.unwrap_or(0.0);
                ProgressTracker {
                    id: goal.id.clone(),
                    label: goal.name.clone(),
                    impact: format!("Target {}", self.currency.format(target)),
                    target_amount: target,
                    progress: goal_progress(goal),
                }
            })
            .collect()
    }

    pub fn vital_signs(
        &self,
        summary: &BudgetSummary,
        forecast: &Forecast,
        committed: f64,
    ) -> Vec<VitalSign> {
        let trend = summary.expense_trend();
        let expenses_rising = trend > 0.0;
        let income = summary.monthly_income();
        let income_covers = income >= summary.monthly_expenses();
        let available = summary.available_now();

        vec![
            VitalSign {
                id: VitalSignId::Available,
                label: "Available Now".to_string(),
                amount: available,
                value: self.currency.format(available),
                delta: trend_delta(trend),
                trend: Trend::from_rising(!expenses_rising),
            },
            VitalSign {
                id: VitalSignId::Burn,
                label: "Daily Burn".to_string(),
                amount: forecast.daily_burn,
                value: self.currency.format(forecast.daily_burn),
                delta: trend_delta(trend),
                trend: Trend::from_rising(expenses_rising),
            },
            VitalSign {
                id: VitalSignId::Income,
                label: "Income Pulse".to_string(),
                amount: income,
                value: self.currency.format(income),
                delta: if income_covers { "+Healthy" } else { "-Lagging" }.to_string(),
                trend: Trend::from_rising(income_covers),
            },
            VitalSign {
                id: VitalSignId::Committed,
                label: "Committed (30d)".to_string(),
                amount: committed,
                value: self.currency.format(committed),
                delta: if committed != 0.0 { "+Active goals" } else { "0" }.to_string(),
                trend: Trend::from_rising(committed != 0.0),
            },
        ]
    }

    pub fn snapshot(&self, available: f64, committed: f64) -> Snapshot {
        let total = available + committed;
        let available_percent = if total > 0.0 {
            (available / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Snapshot {
            available,
            committed,
            available_percent,
            available_formatted: self.currency.format(available),
            committed_formatted: self.currency.format(committed),
        }
    }
}
