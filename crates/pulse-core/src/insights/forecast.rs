//! Forecast Projector
//!
//! Extrapolates month-end spend from the burn rate so far:
//! `dailyBurn = monthlyExpenses / dayOfMonth`, `projected = dailyBurn * daysInMonth`.
//! Overspend is only defined when a monthly budget is set.

use chrono::{Datelike, NaiveDate};

use crate::currency::CurrencyFormatter;
use crate::models::BudgetSummary;

use super::types::Forecast;

/// Midpoint marker shown on the forecast bar
const MILESTONE_DAY: u32 = 15;

pub const NO_BUDGET_WARNING: &str = "Set a monthly budget to unlock alerts.";
pub const WITHIN_BUDGET: &str = "Spending is within your monthly budget.";

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Burn rate given expenses so far and the current day (never divides by zero)
pub fn daily_burn(monthly_expenses: f64, day_of_month: u32) -> f64 {
    if monthly_expenses == 0.0 || !monthly_expenses.is_finite() {
        return 0.0;
    }
    monthly_expenses / day_of_month.max(1) as f64
}

pub struct ForecastProjector<'f> {
    currency: &'f CurrencyFormatter,
}

impl<'f> ForecastProjector<'f> {
    pub fn new(currency: &'f CurrencyFormatter) -> Self {
        Self { currency }
    }

    pub fn project(&self, summary: &BudgetSummary, today: NaiveDate) -> Forecast {
        let day_of_month = today.day();
        let days_in_month = days_in_month(today);

        let daily_burn = daily_burn(summary.monthly_expenses(), day_of_month);
        let projected_spend = daily_burn * days_in_month as f64;

        let budget = summary.budget();
        let overspend = budget.map(|b| (projected_spend - b).max(0.0));

        let fill_percent = match budget {
            Some(b) => projected_spend / b * 100.0,
            None => summary.monthly_expenses() / summary.monthly_income().max(1.0) * 100.0,
        }
        .clamp(0.0, 100.0);

        let warning = match overspend {
            Some(amount) if amount > 0.0 => format!(
                "On track to overspend by {}.",
                self.currency.format(amount)
            ),
            Some(_) => WITHIN_BUDGET.to_string(),
            None => NO_BUDGET_WARNING.to_string(),
        };

        tracing::debug!(
            daily_burn,
            projected_spend,
            overspend = ?overspend,
            "Forecast projected"
        );

        Forecast {
            daily_burn,
            projected_spend,
            overspend,
            days_in_month,
            day_of_month,
            milestone_day: MILESTONE_DAY.min(days_in_month),
            fill_percent,
            warning,
            daily_burn_formatted: self.currency.format(daily_burn),
            projected_spend_formatted: self.currency.format(projected_spend),
            overspend_formatted: overspend.map(|o| self.currency.format(o)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(summary: &BudgetSummary, today: NaiveDate) -> Forecast {
        let currency = CurrencyFormatter::default();
        ForecastProjector::new(&currency).project(summary, today)
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2026, 9, 10)), 30);
        assert_eq!(days_in_month(date(2026, 12, 31)), 31);
        assert_eq!(days_in_month(date(2026, 2, 1)), 28);
        assert_eq!(days_in_month(date(2028, 2, 29)), 29);
    }

    #[test]
    fn test_overspend_example() {
        let summary = BudgetSummary {
            monthly_expenses: Some(3000.0),
            monthly_budget: Some(2500.0),
            ..Default::default()
        };

        let forecast = project(&summary, date(2026, 9, 10));
        assert_eq!(forecast.daily_burn, 300.0);
        assert_eq!(forecast.projected_spend, 9000.0);
        assert_eq!(forecast.overspend, Some(6500.0));
        assert_eq!(forecast.fill_percent, 100.0);
        assert_eq!(forecast.warning, "On track to overspend by ₹6,500.00.");
        assert_eq!(forecast.overspend_formatted.as_deref(), Some("₹6,500.00"));
    }

    #[test]
    fn test_within_budget_has_zero_overspend() {
        let summary = BudgetSummary {
            monthly_expenses: Some(1000.0),
            monthly_budget: Some(5000.0),
            ..Default::default()
        };

        let forecast = project(&summary, date(2026, 9, 10));
        assert_eq!(forecast.projected_spend, 3000.0);
        assert_eq!(forecast.overspend, Some(0.0));
        assert_eq!(forecast.fill_percent, 60.0);
        assert_eq!(forecast.warning, WITHIN_BUDGET);
    }

    #[test]
    fn test_projection_equal_to_budget_is_not_overspend() {
        let summary = BudgetSummary {
            monthly_expenses: Some(1000.0),
            monthly_budget: Some(3000.0),
            ..Default::default()
        };

        let forecast = project(&summary, date(2026, 9, 10));
        assert_eq!(forecast.projected_spend, 3000.0);
        assert_eq!(forecast.overspend, Some(0.0));
        assert_eq!(forecast.overspend_formatted.as_deref(), Some("₹0.00"));
        assert_eq!(forecast.fill_percent, 100.0);
        assert_eq!(forecast.warning, WITHIN_BUDGET);
    }

    #[test]
    fn test_no_budget_leaves_overspend_undefined() {
        let summary = BudgetSummary {
            monthly_expenses: Some(2000.0),
            monthly_income: Some(8000.0),
            ..Default::default()
        };

        let forecast = project(&summary, date(2026, 10, 17));
        assert_eq!(forecast.overspend, None);
        assert_eq!(forecast.overspend_formatted, None);
        assert_eq!(forecast.warning, NO_BUDGET_WARNING);
        // Falls back to expenses over income
        assert_eq!(forecast.fill_percent, 25.0);
    }

    #[test]
    fn test_missing_expenses_zero_everything() {
        let forecast = project(&BudgetSummary::default(), date(2026, 10, 1));
        assert_eq!(forecast.daily_burn, 0.0);
        assert_eq!(forecast.projected_spend, 0.0);
        assert_eq!(forecast.fill_percent, 0.0);
        assert_eq!(forecast.day_of_month, 1);
        assert_eq!(forecast.days_in_month, 31);
        assert_eq!(forecast.milestone_day, 15);
    }

    #[test]
    fn test_daily_burn_guards_day_zero() {
        assert_eq!(daily_burn(300.0, 0), 300.0);
        assert_eq!(daily_burn(0.0, 5), 0.0);
        assert_eq!(daily_burn(f64::NAN, 5), 0.0);
    }
}
