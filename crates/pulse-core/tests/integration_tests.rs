//! Integration tests for pulse-core
//!
//! These tests exercise the full snapshot → report workflow through the
//! public API only.

use pulse_core::{
    insights::{patterns::NO_PATTERNS, ScenarioTone, SkipReason, Tone, Trend},
    test_utils::{expense, income, ist_at, sample_input},
    BudgetSummary, CategorySpending, DashboardSnapshot, EngineConfig, InsightEngine, InsightInput,
    PulseStatus, TransactionFeed,
};

fn engine() -> InsightEngine {
    InsightEngine::new(EngineConfig::default())
}

// =============================================================================
// Pattern Tests
// =============================================================================

#[test]
fn test_monday_cafe_habit() {
    let input = InsightInput {
        transactions: vec![
            expense("1", 220.0, Some("Dining"), Some("Cafe"), Some("2026-10-12")),
            expense("2", 200.0, Some("Dining"), Some("Cafe"), Some("2026-10-05")),
        ],
        ..Default::default()
    };

    let report = engine().analyze(&input, ist_at(2026, 10, 17));
    assert_eq!(
        report.pattern_highlights[0],
        "You often spend ₹210.00 at Cafe on Mondays."
    );
    assert_eq!(
        report.pattern_highlights[1],
        "Your highest spending day is Monday (₹420.00)."
    );
    // No monthly total supplied, so no daily average line
    assert_eq!(report.pattern_highlights.len(), 2);
}

#[test]
fn test_full_sample_report() {
    let report = engine().analyze(&sample_input(), ist_at(2026, 10, 17));

    assert_eq!(
        report.pattern_highlights,
        vec![
            "You often spend ₹210.00 at Cafe on Mondays.".to_string(),
            "Your highest spending day is Friday (₹1,200.00).".to_string(),
            "Average daily spend this month: ₹148.24.".to_string(),
        ]
    );

    // Four of five records carry a category
    assert_eq!(report.confidence_score, Some(80));
    assert_eq!(report.auto_tagged.len(), 4);
    assert_eq!(report.auto_tagged[0].merchant, "Mall");
    assert_eq!(report.auto_tagged[0].tone, Tone::Violet);
    assert_eq!(report.auto_tagged[0].confidence, 80);

    assert_eq!(report.pulse.status, PulseStatus::Healthy);
    assert_eq!(report.forecast.day_of_month, 17);
    assert_eq!(report.forecast.days_in_month, 31);
    assert_eq!(report.forecast.overspend, Some(0.0));

    let action = report.priority_action.expect("top category present");
    assert_eq!(action.title, "Reduce Shopping spend");
    assert_eq!(action.impact, "Save ₹120.00");
    assert_eq!(report.opportunity_items[0].label, "Cut Shopping by 10%");

    assert_eq!(report.progress_trackers.len(), 2);
    assert_eq!(report.progress_trackers[0].progress, 25);
    assert_eq!(report.snapshot.committed, 8000.0);
    assert_eq!(report.vital_signs[0].delta, "-4.5%");
    assert_eq!(report.vital_signs[0].trend, Trend::Up);
}

#[test]
fn test_empty_history_placeholder() {
    let report = engine().analyze(&InsightInput::default(), ist_at(2026, 10, 17));
    assert_eq!(report.pattern_highlights, vec![NO_PATTERNS.to_string()]);
    assert_eq!(report.confidence_score, None);
    assert!(report.priority_action.is_none());
}

#[test]
fn test_income_only_has_no_patterns() {
    let input = InsightInput {
        transactions: vec![income("salary", 50000.0, Some("2026-10-01"))],
        ..Default::default()
    };
    let report = engine().analyze(&input, ist_at(2026, 10, 17));
    assert_eq!(report.pattern_highlights, vec![NO_PATTERNS.to_string()]);
    assert_eq!(report.confidence_score, Some(100));
}

// =============================================================================
// Forecast and Pulse Tests
// =============================================================================

#[test]
fn test_overspend_projection() {
    let input = InsightInput {
        summary: BudgetSummary {
            monthly_expenses: Some(3000.0),
            monthly_budget: Some(2500.0),
            ..Default::default()
        },
        ..Default::default()
    };

    let report = engine().analyze(&input, ist_at(2026, 9, 10));
    assert_eq!(report.forecast.daily_burn, 300.0);
    assert_eq!(report.forecast.projected_spend, 9000.0);
    assert_eq!(report.forecast.overspend, Some(6500.0));
    assert_eq!(report.scenarios[0].detail, "Spending hits ₹9,000.00 by month-end.");
    assert_eq!(report.scenarios[1].title, "If you set a budget");
    assert_eq!(report.scenarios[1].tone, ScenarioTone::Success);
}

#[test]
fn test_pulse_thresholds() {
    let cases = [
        (95.0, PulseStatus::NeedsAttention),
        (70.0, PulseStatus::Watchful),
        (69.9, PulseStatus::Healthy),
    ];

    for (used, expected) in cases {
        let input = InsightInput {
            summary: BudgetSummary {
                budget_used_percentage: Some(used),
                ..Default::default()
            },
            ..Default::default()
        };
        let report = engine().analyze(&input, ist_at(2026, 10, 17));
        assert_eq!(report.pulse.status, expected, "at {}%", used);
    }
}

#[test]
fn test_configured_thresholds_apply() {
    let config = EngineConfig::from_toml(
        r#"
[health]
watchful_at = 40.0
attention_at = 60.0
"#,
    )
    .expect("valid config");

    let input = InsightInput {
        summary: BudgetSummary {
            budget_used_percentage: Some(65.0),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = InsightEngine::new(config).analyze(&input, ist_at(2026, 10, 17));
    assert_eq!(report.pulse.status, PulseStatus::NeedsAttention);
}

// =============================================================================
// Input Handling Tests
// =============================================================================

#[test]
fn test_bad_records_are_reported_not_fatal() {
    let input = InsightInput {
        transactions: vec![
            expense("ok", 50.0, Some("Food"), None, Some("2026-10-12")),
            expense("neg", -10.0, Some("Food"), None, Some("2026-10-12")),
            expense("when", 10.0, Some("Food"), None, Some("last tuesday")),
        ],
        ..Default::default()
    };

    let report = engine().analyze(&input, ist_at(2026, 10, 17));
    let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![SkipReason::NegativeAmount, SkipReason::MalformedDate]
    );
    assert_eq!(report.auto_tagged.len(), 1);
}

#[test]
fn test_unreadable_record_does_not_abort_feed() {
    let feed_json = r#"{"transactions": [
        {"id": "1", "type": "expense", "amount": 220, "category": "Dining",
         "description": "Cafe", "date": "2026-10-12"},
        {"id": "2", "type": "expense", "amount": null, "description": "Cafe"},
        {"id": "3", "type": "expense", "amount": 200, "category": "Dining",
         "description": "Cafe", "date": "2026-10-05"}
    ]}"#;

    let input = InsightInput::from_json(feed_json, "{}").expect("feed parses");
    let report = engine().analyze(&input, ist_at(2026, 10, 17));

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert_eq!(report.skipped[0].id, "2");
    assert_eq!(report.skipped[0].reason, SkipReason::Malformed);
    assert_eq!(report.confidence_score, Some(100));
    assert_eq!(
        report.pattern_highlights[0],
        "You often spend ₹210.00 at Cafe on Mondays."
    );
}

#[test]
fn test_dashboard_payload_round_trip() {
    let summary_json = r#"{
        "stats": {
            "monthlyIncome": 60000,
            "monthlyExpenses": 12000,
            "monthlyBudget": 40000,
            "budgetUsedPercentage": 30,
            "expenseTrend": 12.5,
            "budgetLeft": 28000
        },
        "savingsGoals": [
            {"id": "g1", "name": "Emergency Fund", "targetAmount": 100000,
             "currentAmount": 40000, "monthlyContribution": 5000}
        ],
        "categorySpending": [
            {"name": "Dining", "amount": 5000},
            {"name": "Travel", "amount": 3000}
        ]
    }"#;
    let feed_json = r#"{"transactions": [
        {"id": "a", "type": "expense", "amount": 450, "category": "Dining",
         "description": "Dosa Corner", "date": "2026-10-14T13:05:00+05:30"}
    ]}"#;

    let snapshot: DashboardSnapshot = serde_json::from_str(summary_json).unwrap();
    let feed: TransactionFeed = serde_json::from_str(feed_json).unwrap();
    let input = InsightInput::from_feed(feed, snapshot);

    let report = engine().analyze(&input, ist_at(2026, 10, 17));
    assert_eq!(report.vital_signs[1].delta, "+12.5%");
    assert_eq!(report.vital_signs[1].trend, Trend::Up);
    assert_eq!(report.progress_trackers[0].label, "Emergency Fund");
    assert_eq!(report.progress_trackers[0].progress, 40);
    assert_eq!(
        report.opportunity_items[0].savings_formatted,
        "₹500.00"
    );
    assert_eq!(
        report.pattern_highlights[0],
        "Your highest spending day is Wednesday (₹450.00)."
    );
}

#[test]
fn test_report_json_is_camel_case() {
    let input = InsightInput {
        category_spending: vec![CategorySpending {
            name: "Dining".to_string(),
            amount: 1000.0,
        }],
        ..sample_input()
    };
    let report = engine().analyze(&input, ist_at(2026, 10, 17));
    let value = serde_json::to_value(&report).unwrap();

    for key in [
        "generatedFor",
        "vitalSigns",
        "patternHighlights",
        "autoTagged",
        "confidenceScore",
        "priorityAction",
        "progressTrackers",
        "opportunityItems",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(value["pulse"]["status"], "Healthy");
    assert_eq!(value["forecast"]["dailyBurn"], value["vitalSigns"][1]["amount"]);
    assert_eq!(value["autoTagged"][0]["tone"], "violet");
}

#[test]
fn test_same_input_same_report() {
    let input = sample_input();
    let now = ist_at(2026, 10, 17);
    let a = serde_json::to_value(engine().analyze(&input, now)).unwrap();
    let b = serde_json::to_value(engine().analyze(&input, now)).unwrap();
    assert_eq!(a, b);
}
