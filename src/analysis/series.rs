//! Chart-ready series.
//!
//! Maps a summary's round trend to `x = round`, `y = metric value` points for
//! each boxer. The presentation layer decides how to draw them. Rate metrics
//! use the summary's round length as the time of each round.

use crate::model::Corner;
use crate::registry::MetricDefinition;

use super::types::{FightSummary, PunchTotals, RoundMetrics, Series, SeriesPoint, StatLine};

fn line_over(rounds: &[RoundMetrics], corner: Corner, minutes: f64) -> StatLine {
    // Windows are subsets of rounds the summary already summed, so they fit
    let totals = |side: Corner| {
        PunchTotals::accumulate(rounds.iter().map(|m| &m.corner(side).stats))
            .ok()
            .flatten()
    };
    let own = totals(corner);
    let opponent = totals(corner.opponent());

    let ring_values: Vec<f64> = rounds
        .iter()
        .filter_map(|m| m.corner(corner).stats.ring_control)
        .collect();
    let ring_control = if ring_values.is_empty() {
        None
    } else {
        Some(ring_values.iter().sum::<f64>() / ring_values.len() as f64)
    };

    StatLine {
        totals: own.unwrap_or_default(),
        opponent,
        minutes,
        rounds: rounds.len() as u32,
        ring_control,
    }
}

fn build_series(
    summary: &FightSummary,
    metric: &MetricDefinition,
    span: impl Fn(usize) -> std::ops::Range<usize>,
) -> Vec<Series> {
    let per_round = summary.round_minutes;

    Corner::BOTH
        .into_iter()
        .map(|corner| Series {
            metric: metric.name.clone(),
            corner,
            boxer: summary.corner(corner).boxer.name.clone(),
            points: summary
                .trend
                .iter()
                .enumerate()
                .map(|(i, round)| {
                    let window = &summary.trend[span(i)];
                    let line = line_over(window, corner, per_round * window.len() as f64);
                    SeriesPoint {
                        round: round.round,
                        value: metric.evaluate(&line).ok().flatten(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Metric value of each round on its own, one series per boxer
pub fn round_series(summary: &FightSummary, metric: &MetricDefinition) -> Vec<Series> {
    build_series(summary, metric, |i| i..i + 1)
}

/// Metric value over rounds 1..=n for every n, one series per boxer
pub fn cumulative_series(summary: &FightSummary, metric: &MetricDefinition) -> Vec<Series> {
    build_series(summary, metric, |i| 0..i + 1)
}
