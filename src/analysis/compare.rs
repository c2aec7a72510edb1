//! Comparison engine.
//!
//! Ranks fighters (or whole fights) across one metric or an ordered chain of
//! metrics. Ranking uses standard competition ranking: tied entries share a
//! rank and the next distinct value skips ahead by the size of the tie group
//! (`[0.80, 0.80, 0.75]` ranks as `[1, 1, 3]`).

use std::cmp::Ordering;

use crate::error::StatsError;
use crate::model::Corner;
use crate::registry::{Extraction, MetricDefinition, Polarity};

use super::types::{
    ComparisonEntry, ComparisonResult, ComparisonScope, FightSummary, StatLine, Standing,
    UnrankedReason,
};

/// Values closer than this are considered equal
pub const DEFAULT_TIE_EPSILON: f64 = 1e-9;

/// Ranks summaries by metric definitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonEngine {
    epsilon: f64,
    scope: ComparisonScope,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TIE_EPSILON, ComparisonScope::Fighters)
    }
}

/// A compared subject before ranking
struct Subject<'a> {
    summary: &'a FightSummary,
    corner: Option<Corner>,
    line: &'a StatLine,
}

impl ComparisonEngine {
    pub fn new(epsilon: f64, scope: ComparisonScope) -> Self {
        Self { epsilon, scope }
    }

    pub fn with_scope(self, scope: ComparisonScope) -> Self {
        Self { scope, ..self }
    }

    pub fn scope(&self) -> ComparisonScope {
        self.scope
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Rank by a single metric
    pub fn compare(&self, entries: &[FightSummary], metric: &MetricDefinition) -> ComparisonResult {
        self.rank(entries, std::slice::from_ref(&metric))
    }

    /// Rank by an ordered metric chain; later metrics break earlier ties
    pub fn compare_by(
        &self,
        entries: &[FightSummary],
        metrics: &[&MetricDefinition],
    ) -> Result<ComparisonResult, StatsError> {
        if metrics.is_empty() {
            return Err(StatsError::InvalidMetric(
                "comparison needs at least one metric".to_string(),
            ));
        }
        Ok(self.rank(entries, metrics))
    }

    fn subjects<'a>(&self, entries: &'a [FightSummary]) -> Vec<Subject<'a>> {
        match self.scope {
            ComparisonScope::Fighters => entries
                .iter()
                .flat_map(|summary| {
                    Corner::BOTH.into_iter().map(move |corner| Subject {
                        summary,
                        corner: Some(corner),
                        line: &summary.corner(corner).line,
                    })
                })
                .collect(),
            ComparisonScope::Fights => entries
                .iter()
                .map(|summary| Subject {
                    summary,
                    corner: None,
                    line: &summary.combined,
                })
                .collect(),
        }
    }

    fn rank(&self, entries: &[FightSummary], metrics: &[&MetricDefinition]) -> ComparisonResult {
        let subjects = self.subjects(entries);

        let mut values: Vec<Vec<Option<f64>>> = Vec::with_capacity(subjects.len());
        let mut standings: Vec<Option<Standing>> = Vec::with_capacity(subjects.len());
        let mut candidates = Vec::new();

        for (index, subject) in subjects.iter().enumerate() {
            let extractions: Vec<Extraction> =
                metrics.iter().map(|m| m.extract(subject.line)).collect();

            let standing = match extractions[0] {
                Extraction::Value(_) => {
                    candidates.push(index);
                    None
                }
                Extraction::Undefined => Some(Standing::Unranked {
                    reason: UnrankedReason::Undefined,
                }),
                Extraction::Missing(field) => Some(Standing::Unranked {
                    reason: UnrankedReason::MissingData {
                        detail: format!("'{}' not recorded", field),
                    },
                }),
            };

            values.push(
                extractions
                    .into_iter()
                    .map(|e| match e {
                        Extraction::Value(v) => Some(v),
                        _ => None,
                    })
                    .collect(),
            );
            standings.push(standing);
        }

        let polarities: Vec<Polarity> = metrics.iter().map(|m| m.polarity).collect();
        let mut groups = Vec::new();
        self.group(candidates, &values, &polarities, 0, &mut groups);

        let mut order = Vec::with_capacity(subjects.len());
        let mut position = 0;
        for (group_index, group) in groups.iter().enumerate() {
            let rank = position + 1;
            for &index in group {
                standings[index] = Some(Standing::Ranked {
                    rank,
                    tie_group: group_index + 1,
                });
                order.push(index);
            }
            position += group.len();
        }

        let ranked_count = order.len();
        order.extend(
            (0..subjects.len())
                .filter(|&i| !matches!(standings[i], Some(Standing::Ranked { .. }))),
        );

        log::debug!(
            "Compared {} entries by [{}]: {} ranked in {} groups, {} unranked",
            subjects.len(),
            metrics.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join(", "),
            ranked_count,
            groups.len(),
            subjects.len() - ranked_count
        );

        let mut slots: Vec<Option<(Vec<Option<f64>>, Standing)>> = values
            .into_iter()
            .zip(standings)
            .map(|(v, s)| s.map(|s| (v, s)))
            .collect();

        let result_entries = order
            .into_iter()
            .filter_map(|index| {
                let (values, standing) = slots[index].take()?;
                let subject = &subjects[index];
                Some(ComparisonEntry {
                    fight_id: subject.summary.fight_id.clone(),
                    fight_title: subject.summary.title.clone(),
                    corner: subject.corner,
                    boxer: subject
                        .corner
                        .map(|corner| subject.summary.corner(corner).boxer.clone()),
                    values,
                    standing,
                })
            })
            .collect();

        ComparisonResult {
            metrics: metrics.iter().map(|m| m.name.clone()).collect(),
            scope: self.scope,
            entries: result_entries,
        }
    }

    /// Split `members` into ordered tie groups, refining by each metric in
    /// turn. Fully tied members keep input order.
    fn group(
        &self,
        mut members: Vec<usize>,
        values: &[Vec<Option<f64>>],
        polarities: &[Polarity],
        depth: usize,
        out: &mut Vec<Vec<usize>>,
    ) {
        if members.is_empty() {
            return;
        }
        if depth == polarities.len() || members.len() == 1 {
            out.push(members);
            return;
        }

        let polarity = polarities[depth];
        members.sort_by(|&a, &b| {
            order_values(values[a][depth], values[b][depth], polarity).then(a.cmp(&b))
        });

        let mut start = 0;
        while start < members.len() {
            let leader = values[members[start]][depth];
            let mut end = start + 1;
            while end < members.len() && self.tied(leader, values[members[end]][depth]) {
                end += 1;
            }
            self.group(members[start..end].to_vec(), values, polarities, depth + 1, out);
            start = end;
        }
    }

    fn tied(&self, a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => (a - b).abs() <= self.epsilon,
            (None, None) => true,
            _ => false,
        }
    }
}

/// Best first; undefined values after every defined one
fn order_values(a: Option<f64>, b: Option<f64>, polarity: Polarity) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match polarity {
            Polarity::HigherIsBetter => b.total_cmp(&a),
            Polarity::LowerIsBetter => a.total_cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank every (fighter, fight) pair by one metric with default settings
pub fn compare(entries: &[FightSummary], metric: &MetricDefinition) -> ComparisonResult {
    ComparisonEngine::default().compare(entries, metric)
}
