//! Test utilities for pulse-core
//!
//! Fixture builders for transactions, goals and a fixed clock so tests can
//! pin "now" instead of reading the wall clock. Enabled for unit tests and
//! for other crates through the `test-utils` feature.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::insights::InsightInput;
use crate::models::{
    BudgetSummary, CategorySpending, SavingsGoal, Transaction, TransactionKind,
};

/// India Standard Time, +05:30
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset")
}

/// Noon local time on the given day, in IST
pub fn ist_at(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date");
    ist()
        .from_local_datetime(&naive)
        .single()
        .expect("unambiguous local time")
}

/// An expense with the given optional fields
pub fn expense(
    id: &str,
    amount: f64,
    category: Option<&str>,
    description: Option<&str>,
    date: Option<&str>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TransactionKind::Expense,
        amount,
        category: category.map(String::from),
        description: description.map(String::from),
        date: date.map(String::from),
        payment_method: None,
    }
}

pub fn income(id: &str, amount: f64, date: Option<&str>) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TransactionKind::Income,
        amount,
        category: Some("Salary".to_string()),
        description: Some("Payroll".to_string()),
        date: date.map(String::from),
        payment_method: None,
    }
}

pub fn goal(
    id: &str,
    target: f64,
    current: f64,
    monthly: f64,
    progress: Option<f64>,
) -> SavingsGoal {
    SavingsGoal {
        id: id.to_string(),
        name: id.to_string(),
        target_amount: Some(target),
        current_amount: current,
        monthly_contribution: monthly,
        progress,
    }
}

/// A mid-October snapshot with two Monday cafe visits and a set budget
pub fn sample_input() -> InsightInput {
    InsightInput {
        transactions: vec![
            expense("t1", 1200.0, Some("Shopping"), Some("Mall"), Some("2026-10-16")),
            expense("t2", 220.0, Some("Dining"), Some("Cafe"), Some("2026-10-12")),
            income("t3", 50000.0, Some("2026-10-10")),
            expense("t4", 200.0, Some("Dining"), Some("Cafe"), Some("2026-10-05")),
            expense("t5", 900.0, None, Some("Corner Store"), Some("2026-10-03")),
        ],
        summary: BudgetSummary {
            monthly_income: Some(50000.0),
            monthly_expenses: Some(2520.0),
            monthly_budget: Some(30000.0),
            budget_used_percentage: Some(8.4),
            expense_trend: Some(-4.5),
            total_balance: Some(120000.0),
            budget_left: Some(27480.0),
        },
        goals: vec![
            goal("emergency", 100000.0, 25000.0, 5000.0, None),
            goal("trip", 60000.0, 15000.0, 3000.0, None),
        ],
        category_spending: vec![
            CategorySpending {
                name: "Shopping".to_string(),
                amount: 1200.0,
            },
            CategorySpending {
                name: "Uncategorized".to_string(),
                amount: 900.0,
            },
            CategorySpending {
                name: "Dining".to_string(),
                amount: 420.0,
            },
        ],
        rejected: Vec::new(),
    }
}
