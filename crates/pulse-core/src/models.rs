//! Domain models for Pulse
//!
//! These are the caller-supplied snapshots the engine reads. They mirror the
//! JSON shapes of the transaction listing and dashboard summary collaborators,
//! so every key is camelCase and nearly everything is optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category label used when a transaction has none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logged transaction, as returned by the transaction listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always non-negative; direction comes from `kind`
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 timestamp or bare `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Category with blank values treated as missing
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Category for display, defaulting to "Uncategorized"
    pub fn category_or_default(&self) -> &str {
        self.category().unwrap_or(UNCATEGORIZED)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn payment_method(&self) -> Option<&str> {
        non_blank(self.payment_method.as_deref())
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Transaction listing as served by the backend: either a bare array or
/// wrapped in `{"transactions": [...]}`.
///
/// Records are held raw so one bad element does not sink the whole feed;
/// [`TransactionFeed::into_parts`] converts them one at a time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransactionFeed {
    Listing { transactions: Vec<Value> },
    Bare(Vec<Value>),
}

/// A feed element that could not be read as a [`Transaction`]
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the raw feed
    pub index: usize,
    /// The record's `id` when one could be recovered
    pub id: String,
    pub error: String,
}

impl TransactionFeed {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::Listing { transactions } => transactions,
            Self::Bare(transactions) => transactions,
        }
    }

    /// Split into well-formed transactions (feed order kept) and rejects
    pub fn into_parts(self) -> (Vec<Transaction>, Vec<RejectedRecord>) {
        let mut transactions = Vec::new();
        let mut rejected = Vec::new();

        for (index, record) in self.into_records().into_iter().enumerate() {
            let id = record_id(&record);
            match serde_json::from_value::<Transaction>(record) {
                Ok(tx) => transactions.push(tx),
                Err(e) => rejected.push(RejectedRecord {
                    index,
                    id,
                    error: e.to_string(),
                }),
            }
        }

        (transactions, rejected)
    }
}

/// Best-effort `id` of a raw record (string or number)
fn record_id(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

/// Current-month budget figures from the dashboard summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetSummary {
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    /// Absent or zero disables budget-relative features
    pub monthly_budget: Option<f64>,
    pub budget_used_percentage: Option<f64>,
    /// Signed percent change in expenses vs last month
    pub expense_trend: Option<f64>,
    pub total_balance: Option<f64>,
    pub budget_left: Option<f64>,
}

impl BudgetSummary {
    pub fn monthly_income(&self) -> f64 {
        finite_or_zero(self.monthly_income)
    }

    pub fn monthly_expenses(&self) -> f64 {
        finite_or_zero(self.monthly_expenses)
    }

    /// The monthly budget, only when one has actually been set
    pub fn budget(&self) -> Option<f64> {
        self.monthly_budget.filter(|b| b.is_finite() && *b > 0.0)
    }

    pub fn budget_used_percentage(&self) -> f64 {
        finite_or_zero(self.budget_used_percentage)
    }

    pub fn expense_trend(&self) -> f64 {
        finite_or_zero(self.expense_trend)
    }

    /// Funds available now: budget left, else total balance, else zero
    pub fn available_now(&self) -> f64 {
        self.budget_left
            .or(self.total_balance)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// A savings goal with its contribution plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Option<f64>,
    pub current_amount: f64,
    pub monthly_contribution: f64,
    /// Precomputed percent, when the backend supplies one
    pub progress: Option<f64>,
}

/// Spend for one category this month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategorySpending {
    pub name: String,
    pub amount: f64,
}

/// Dashboard summary payload: stats plus goals and the category breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSnapshot {
    pub stats: BudgetSummary,
    pub savings_goals: Vec<SavingsGoal>,
    /// Sorted descending by amount
    pub category_spending: Vec<CategorySpending>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
