//! Analyze command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use pulse_core::{
    DashboardSnapshot, EngineConfig, InsightEngine, InsightInput, InsightReport, TransactionFeed,
};

use crate::cli::OutputFormat;

/// Read a transaction listing (bare array or `{"transactions": [...]}`).
///
/// Only the envelope must be valid; unreadable records are reported later.
pub fn read_transactions(path: &Path) -> Result<TransactionFeed> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid transactions JSON in {}", path.display()))
}

/// Read the dashboard summary payload
pub fn read_snapshot(path: &Path) -> Result<DashboardSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read summary from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid summary JSON in {}", path.display()))
}

/// Resolve `--now`: RFC 3339 keeps its offset, a bare date is local midnight
pub fn parse_now(raw: Option<&str>) -> Result<DateTime<FixedOffset>> {
    let Some(raw) = raw else {
        return Ok(Local::now().fixed_offset());
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid --now value: {} (use RFC 3339 or YYYY-MM-DD)", raw))?;
    let midnight = date.and_hms_opt(0, 0, 0).context("Invalid --now date")?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .with_context(|| format!("{} does not exist in the local timezone", raw))
}

pub fn render_json(report: &InsightReport, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(out)
}

/// Render the report as a terminal dashboard
pub fn render_text(report: &InsightReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    let rule = "   ─────────────────────────────────────────────────────────────".to_string();

    lines.push(String::new());
    lines.push(format!(
        "💓 Financial Pulse: {} ({:.1}% of budget used)",
        report.pulse.label, report.pulse.budget_used_percentage
    ));
    lines.push(format!("   {}", report.pulse.message));
    lines.push(rule.clone());

    for sign in &report.vital_signs {
        lines.push(format!(
            "   {:18} {:>16}  {}",
            sign.label, sign.value, sign.delta
        ));
    }

    lines.push(String::new());
    lines.push("🔍 Patterns".to_string());
    lines.push(rule.clone());
    for highlight in &report.pattern_highlights {
        lines.push(format!("   • {}", highlight));
    }

    lines.push(String::new());
    lines.push("📈 Forecast".to_string());
    lines.push(rule.clone());
    lines.push(format!(
        "   Day {} of {}: burning {} per day, heading for {}",
        report.forecast.day_of_month,
        report.forecast.days_in_month,
        report.forecast.daily_burn_formatted,
        report.forecast.projected_spend_formatted
    ));
    lines.push(format!("   {}", report.forecast.warning));

    if !report.auto_tagged.is_empty() {
        lines.push(String::new());
        match report.confidence_score {
            Some(score) => lines.push(format!("🏷️  Recent Transactions ({}% categorized)", score)),
            None => lines.push("🏷️  Recent Transactions".to_string()),
        }
        lines.push(rule.clone());
        for tx in &report.auto_tagged {
            lines.push(format!(
                "   {:24} {:>12}  {:16} {:>3}%",
                truncate(&tx.merchant, 24),
                tx.amount_formatted,
                truncate(&tx.category, 16),
                tx.confidence
            ));
        }
    }

    lines.push(String::new());
    lines.push("💡 Recommendations".to_string());
    lines.push(rule.clone());
    if let Some(action) = &report.priority_action {
        lines.push(format!("   {} ({})", action.title, action.impact));
        lines.push(format!("   {}", action.detail));
    }
    for scenario in &report.scenarios {
        lines.push(format!("   {}: {}", scenario.title, scenario.detail));
    }

    if !report.progress_trackers.is_empty() {
        lines.push(String::new());
        lines.push("🎯 Goals".to_string());
        lines.push(rule);
        for tracker in &report.progress_trackers {
            lines.push(format!(
                "   {:24} {:>3}%  {}",
                truncate(&tracker.label, 24),
                tracker.progress,
                tracker.impact
            ));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Truncate to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Build the report for the given files without printing it
pub fn build_report(
    config: EngineConfig,
    transactions_path: &Path,
    summary_path: &Path,
    now: Option<&str>,
) -> Result<InsightReport> {
    let feed = read_transactions(transactions_path)?;
    let snapshot = read_snapshot(summary_path)?;
    let now = parse_now(now)?;

    let input = InsightInput::from_feed(feed, snapshot);
    tracing::debug!(
        transactions = input.transactions.len(),
        rejected = input.rejected.len(),
        goals = input.goals.len(),
        now = %now.to_rfc3339(),
        "Loaded snapshot"
    );

    let engine = InsightEngine::new(config);
    let report = engine.analyze(&input, now);

    for skipped in &report.skipped {
        tracing::warn!(
            index = skipped.index,
            id = %skipped.id,
            reason = skipped.reason.as_str(),
            detail = skipped.detail.as_deref().unwrap_or(""),
            "Skipped transaction"
        );
    }

    Ok(report)
}

pub fn cmd_analyze(
    config: EngineConfig,
    transactions_path: &Path,
    summary_path: &Path,
    now: Option<&str>,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let report = build_report(config, transactions_path, summary_path, now)?;

    match format {
        OutputFormat::Json => println!("{}", render_json(&report, pretty)?),
        OutputFormat::Text => println!("{}", render_text(&report)),
    }

    Ok(())
}
