//! Report generation for fight summaries and comparisons.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::model::{Corner, FightResult};
use crate::registry::MetricRegistry;

use super::types::*;
use super::verdict::describe_prediction;

/// Metadata stamped on every report
pub fn create_metadata(fights: usize) -> ReportMetadata {
    ReportMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        fights,
    }
}

/// Generate JSON report
pub fn generate_json_report<T: Serialize>(report: &T, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report for a single fight
pub fn generate_fight_text_report(report: &FightReport, output_path: &Path) -> Result<()> {
    write_text(&render_fight_text(report), output_path)
}

/// Generate human-readable text report for a comparison
pub fn generate_comparison_text_report(
    report: &ComparisonReport,
    registry: &MetricRegistry,
    output_path: &Path,
) -> Result<()> {
    write_text(&render_comparison_text(report, registry), output_path)
}

fn write_text(text: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, text)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push("=".repeat(80));
    lines.push(format!("{:^80}", title));
    lines.push("=".repeat(80));
    lines.push(String::new());
}

fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn num(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn count(value: Option<crate::model::PunchCount>) -> String {
    value
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn describe_result(summary: &FightSummary) -> String {
    match summary.result {
        Some(FightResult::Win { winner, method }) => {
            let name = &summary.corner(winner).boxer.name;
            match method {
                Some(method) => format!("{} by {:?}", name, method),
                None => format!("{} won", name),
            }
        }
        Some(FightResult::Draw) => "Draw".to_string(),
        Some(FightResult::NoContest) => "No contest".to_string(),
        None => "Unknown".to_string(),
    }
}

/// Render the single-fight text report
pub fn render_fight_text(report: &FightReport) -> String {
    let summary = &report.summary;
    let mut lines: Vec<String> = Vec::new();

    banner(&mut lines, &summary.title.to_uppercase());

    if let Some(date) = summary.date {
        lines.push(format!("Date: {}", date));
    }
    lines.push(format!(
        "Rounds: {} of {} scheduled ({:.1} minutes)",
        summary.rounds_completed, summary.scheduled_rounds, summary.elapsed_minutes
    ));
    lines.push(format!("Result: {}", describe_result(summary)));
    lines.push(format!("Report generated: {}", report.metadata.generated_at));
    lines.push(String::new());

    banner(&mut lines, "FIGHT TOTALS");

    let red = &summary.red;
    let blue = &summary.blue;
    lines.push(format!("{:<28}{:>24}{:>24}", "", red.boxer.name, blue.boxer.name));
    let mut row = |label: &str, r: String, b: String| {
        lines.push(format!("{:<28}{:>24}{:>24}", label, r, b));
    };
    row(
        "Punches landed/thrown",
        count(Some(red.line.totals.total)),
        count(Some(blue.line.totals.total)),
    );
    row("Accuracy", pct(red.accuracy), pct(blue.accuracy));
    row("Work rate (per min)", num(red.work_rate), num(blue.work_rate));
    row("Jabs", count(red.line.totals.jabs), count(blue.line.totals.jabs));
    row("Power punches", count(red.line.totals.power), count(blue.line.totals.power));
    row(
        "Significant punches",
        count(red.line.totals.significant),
        count(blue.line.totals.significant),
    );
    let ring = |value: Option<f64>| {
        value
            .map(|v| format!("{:.1}%", v))
            .unwrap_or_else(|| "n/a".to_string())
    };
    row(
        "Ring control (mean)",
        ring(red.line.ring_control),
        ring(blue.line.ring_control),
    );
    row("Rounds won (landed)", red.rounds_won.to_string(), blue.rounds_won.to_string());
    lines.push(format!("Even rounds: {}", summary.even_rounds));
    lines.push(String::new());

    banner(&mut lines, "ROUND BY ROUND");

    lines.push(format!(
        "{:>5}  {:>10} {:>8}  {:>10} {:>8}  {:>6}",
        "Round", "Red L/T", "Acc", "Blue L/T", "Acc", "Diff"
    ));
    for round in &summary.trend {
        lines.push(format!(
            "{:>5}  {:>10} {:>8}  {:>10} {:>8}  {:>+6}",
            round.round,
            round.red.stats.total.to_string(),
            pct(round.red.accuracy),
            round.blue.stats.total.to_string(),
            pct(round.blue.accuracy),
            round.red.landed_differential
        ));
    }
    lines.push(String::new());

    banner(&mut lines, "PREDICTION");
    lines.push(describe_prediction(summary, &report.prediction));
    lines.push(String::new());

    lines.join("\n")
}

/// Render the comparison text report
pub fn render_comparison_text(report: &ComparisonReport, registry: &MetricRegistry) -> String {
    let result = &report.result;
    let mut lines: Vec<String> = Vec::new();

    banner(&mut lines, "FIGHT COMPARISON");

    let scope = match result.scope {
        ComparisonScope::Fighters => "fighters",
        ComparisonScope::Fights => "fights",
    };
    lines.push(format!("Fights compared: {}", report.metadata.fights));
    lines.push(format!("Scope: {}", scope));
    for (i, name) in result.metrics.iter().enumerate() {
        let detail = registry
            .get(name)
            .map(|m| format!("{} [{}]", m.label, m.unit))
            .unwrap_or_default();
        let role = if i == 0 { "Ranked by" } else { "Then by" };
        lines.push(format!("{}: {} {}", role, name, detail));
    }
    lines.push(String::new());

    let mut header = format!("{:>5}  {:<28}{:<36}", "Rank", "Subject", "Fight");
    for name in &result.metrics {
        header.push_str(&format!("{:>14}", truncate(name, 13)));
    }
    lines.push(header);

    for entry in &result.entries {
        let rank = match &entry.standing {
            Standing::Ranked { rank, .. } => rank.to_string(),
            Standing::Unranked { .. } => "-".to_string(),
        };
        let mut line = format!(
            "{:>5}  {:<28}{:<36}",
            rank,
            truncate(entry.label(), 27),
            truncate(&entry.fight_title, 35)
        );
        for value in &entry.values {
            line.push_str(&format!("{:>14}", num(*value)));
        }
        if let Standing::Unranked { reason } = &entry.standing {
            match reason {
                UnrankedReason::Undefined => line.push_str("  (undefined)"),
                UnrankedReason::MissingData { detail } => {
                    line.push_str(&format!("  (missing: {})", detail))
                }
            }
        }
        lines.push(line);
    }
    lines.push(String::new());

    if !report.skipped.is_empty() {
        lines.push("Skipped fights:".to_string());
        for (fight_id, reason) in &report.skipped {
            lines.push(format!("  {}: {}", fight_id, reason));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Print a short fight summary to stdout
pub fn print_fight_summary(report: &FightReport) {
    let summary = &report.summary;
    println!("\n=== {} ===\n", summary.title);
    println!(
        "Rounds: {}/{} ({:.1} min)",
        summary.rounds_completed, summary.scheduled_rounds, summary.elapsed_minutes
    );
    for corner in Corner::BOTH {
        let side = summary.corner(corner);
        println!(
            "  {}: {} landed, accuracy {}, work rate {}/min",
            side.boxer.name,
            side.line.totals.total,
            pct(side.accuracy),
            num(side.work_rate)
        );
    }
    println!("\n{}", describe_prediction(summary, &report.prediction));
    println!();
}

/// Print the top of a comparison to stdout
pub fn print_comparison(report: &ComparisonReport) {
    let result = &report.result;
    println!("\n=== COMPARISON BY {} ===\n", result.metrics.join(" > ").to_uppercase());
    for entry in result.ranked().take(10) {
        let value = entry.values.first().copied().flatten();
        println!(
            "  {:>3}. {} ({}): {}",
            entry.rank().unwrap_or_default(),
            entry.label(),
            entry.fight_title,
            num(value)
        );
    }
    let unranked = result.unranked().count();
    if unranked > 0 {
        println!("  ({} unranked)", unranked);
    }
    if !report.skipped.is_empty() {
        println!("  ({} fights skipped)", report.skipped.len());
    }
    println!();
}
