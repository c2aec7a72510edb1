//! Derived data types produced by the analysis layer.
//!
//! Every value here is freshly built from the input records and owns its
//! data, so summaries and comparison results can be handed to the
//! presentation layer without borrowing from the fights they came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::{ratio, Boxer, Corner, FightResult, PunchCategory, PunchCount, PunchStats};

/// Running totals of one boxer up to and including a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Cumulative {
    pub landed: u32,
    pub thrown: u32,
    pub accuracy: Option<f64>,
    pub landed_differential: i64,
}

/// Metrics of one boxer in one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerRoundMetrics {
    pub stats: PunchStats,
    /// `None` when nothing was thrown, which is not the same as 0.0
    pub accuracy: Option<f64>,
    pub jab_accuracy: Option<f64>,
    pub power_accuracy: Option<f64>,
    pub significant_accuracy: Option<f64>,
    /// Own landed minus opponent landed
    pub landed_differential: i64,
    pub cumulative: Cumulative,
}

/// Metrics of both boxers in one round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundMetrics {
    pub round: u32,
    pub red: CornerRoundMetrics,
    pub blue: CornerRoundMetrics,
}

impl RoundMetrics {
    pub fn corner(&self, corner: Corner) -> &CornerRoundMetrics {
        match corner {
            Corner::Red => &self.red,
            Corner::Blue => &self.blue,
        }
    }

    pub fn corner_mut(&mut self, corner: Corner) -> &mut CornerRoundMetrics {
        match corner {
            Corner::Red => &mut self.red,
            Corner::Blue => &mut self.blue,
        }
    }

    /// Corner that landed more punches this round, `None` for an even round
    pub fn leader(&self) -> Option<Corner> {
        match self.red.landed_differential {
            d if d > 0 => Some(Corner::Red),
            d if d < 0 => Some(Corner::Blue),
            _ => None,
        }
    }
}

/// Per-category sums over a set of rounds.
///
/// An optional category survives only when every summed round recorded it,
/// so partial sums never masquerade as totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PunchTotals {
    pub total: PunchCount,
    pub jabs: Option<PunchCount>,
    pub power: Option<PunchCount>,
    pub significant: Option<PunchCount>,
    pub head_landed: Option<u32>,
    pub body_landed: Option<u32>,
}

impl PunchTotals {
    /// Totals covering a single round
    pub fn from_stats(stats: &PunchStats) -> Self {
        Self {
            total: stats.total,
            jabs: stats.jabs,
            power: stats.power,
            significant: stats.significant,
            head_landed: stats.head_landed,
            body_landed: stats.body_landed,
        }
    }

    /// Sum of several rounds, `None` for an empty iterator.
    ///
    /// Fails with `CountOverflow` when a sum leaves the `u32` range.
    pub fn accumulate<'a>(
        stats: impl IntoIterator<Item = &'a PunchStats>,
    ) -> Result<Option<Self>, StatsError> {
        let mut iter = stats.into_iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let mut totals = Self::from_stats(first);
        for round in iter {
            totals.merge(&Self::from_stats(round))?;
        }
        Ok(Some(totals))
    }

    /// Add another set of totals into this one
    pub fn merge(&mut self, other: &PunchTotals) -> Result<(), StatsError> {
        self.total = self
            .total
            .checked_add(other.total)
            .ok_or_else(|| overflow("total"))?;
        self.jabs = both(self.jabs, other.jabs, PunchCount::checked_add, "jabs")?;
        self.power = both(self.power, other.power, PunchCount::checked_add, "power")?;
        self.significant = both(
            self.significant,
            other.significant,
            PunchCount::checked_add,
            "significant",
        )?;
        self.head_landed = both(
            self.head_landed,
            other.head_landed,
            u32::checked_add,
            "head_landed",
        )?;
        self.body_landed = both(
            self.body_landed,
            other.body_landed,
            u32::checked_add,
            "body_landed",
        )?;
        Ok(())
    }

    pub fn category(&self, category: PunchCategory) -> Option<PunchCount> {
        match category {
            PunchCategory::Total => Some(self.total),
            PunchCategory::Jab => self.jabs,
            PunchCategory::Power => self.power,
            PunchCategory::Significant => self.significant,
        }
    }
}

fn overflow(category: &str) -> StatsError {
    StatsError::CountOverflow(format!("{} totals exceed the u32 range", category))
}

/// Sum of two optional counts, `None` unless both are present
fn both<T>(
    a: Option<T>,
    b: Option<T>,
    add: fn(T, T) -> Option<T>,
    category: &str,
) -> Result<Option<T>, StatsError> {
    match (a, b) {
        (Some(a), Some(b)) => add(a, b).map(Some).ok_or_else(|| overflow(category)),
        _ => Ok(None),
    }
}

/// Everything a metric extractor may look at for one subject.
///
/// A subject is one boxer over a round or a fight, or both boxers of a fight
/// combined (then `opponent` is `None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatLine {
    pub totals: PunchTotals,
    pub opponent: Option<PunchTotals>,
    /// Elapsed fight time covered by the line
    pub minutes: f64,
    pub rounds: u32,
    /// Mean ring control over the rounds that reported it
    pub ring_control: Option<f64>,
}

impl StatLine {
    pub fn accuracy(&self) -> Option<f64> {
        self.totals.total.accuracy()
    }

    /// Punches thrown per minute
    pub fn work_rate(&self) -> Option<f64> {
        if self.minutes > 0.0 {
            ratio(self.totals.total.thrown as f64, self.minutes)
        } else {
            None
        }
    }

    /// Punches landed per minute
    pub fn landed_per_minute(&self) -> Option<f64> {
        if self.minutes > 0.0 {
            ratio(self.totals.total.landed as f64, self.minutes)
        } else {
            None
        }
    }
}

/// Whole-fight aggregate of one boxer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxerSummary {
    pub corner: Corner,
    pub boxer: Boxer,
    pub line: StatLine,
    /// Recomputed from summed counts, never averaged over rounds
    pub accuracy: Option<f64>,
    pub work_rate: Option<f64>,
    /// Rounds in which this boxer landed more punches than the opponent
    pub rounds_won: u32,
}

/// Whole-fight aggregate derived from all of a fight's rounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightSummary {
    pub fight_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<FightResult>,
    pub scheduled_rounds: u32,
    pub rounds_completed: u32,
    pub elapsed_minutes: f64,
    /// Length of one recorded round, the time base of per-round series
    pub round_minutes: f64,
    pub red: BoxerSummary,
    pub blue: BoxerSummary,
    /// Rounds where both boxers landed the same number of punches
    pub even_rounds: u32,
    /// Both boxers together, used for fight-level comparisons
    pub combined: StatLine,
    pub trend: Vec<RoundMetrics>,
}

impl FightSummary {
    pub fn corner(&self, corner: Corner) -> &BoxerSummary {
        match corner {
            Corner::Red => &self.red,
            Corner::Blue => &self.blue,
        }
    }
}

/// What is being ranked in a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonScope {
    /// Every boxer of every fight
    #[default]
    Fighters,
    /// Every fight, both boxers combined
    Fights,
}

/// Why an entry could not be ranked
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnrankedReason {
    /// The metric has no value for this entry (e.g. accuracy with zero thrown)
    Undefined,
    /// The metric needs data the source did not record
    MissingData { detail: String },
}

/// Position of an entry in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Standing {
    Ranked { rank: usize, tie_group: usize },
    Unranked { reason: UnrankedReason },
}

/// One compared (fighter, fight) pair or fight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub fight_id: String,
    pub fight_title: String,
    /// Set for fighter-scope entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner: Option<Corner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxer: Option<Boxer>,
    /// One value per metric of the chain, `None` when undefined
    pub values: Vec<Option<f64>>,
    pub standing: Standing,
}

impl ComparisonEntry {
    pub fn rank(&self) -> Option<usize> {
        match self.standing {
            Standing::Ranked { rank, .. } => Some(rank),
            Standing::Unranked { .. } => None,
        }
    }

    /// Boxer name for fighter entries, fight title otherwise
    pub fn label(&self) -> &str {
        match &self.boxer {
            Some(boxer) => &boxer.name,
            None => &self.fight_title,
        }
    }
}

/// Ranked comparison of fighters or fights across a metric chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Metric names, primary first
    pub metrics: Vec<String>,
    pub scope: ComparisonScope,
    /// Ranked entries in rank order, then unranked entries in input order
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonResult {
    pub fn ranked(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter().filter(|e| e.rank().is_some())
    }

    pub fn unranked(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter().filter(|e| e.rank().is_none())
    }

    /// Ranks in result order, `None` for unranked entries
    pub fn ranks(&self) -> Vec<Option<usize>> {
        self.entries.iter().map(ComparisonEntry::rank).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Basis used by the winner prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionBasis {
    SignificantLanded,
    TotalLanded,
}

/// Landed-punch verdict for a fight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// `None` when both sides landed the same number
    pub winner: Option<Corner>,
    pub basis: PredictionBasis,
    pub red_landed: u32,
    pub blue_landed: u32,
    pub red_accuracy: Option<f64>,
    pub blue_accuracy: Option<f64>,
}

/// One point of a chart series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub round: u32,
    pub value: Option<f64>,
}

/// Round-by-round values of a metric for one boxer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub metric: String,
    pub corner: Corner,
    pub boxer: String,
    pub points: Vec<SeriesPoint>,
}

/// Provenance of a generated report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub tool_version: String,
    pub fights: usize,
}

/// Everything the single-fight view needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightReport {
    pub metadata: ReportMetadata,
    pub summary: FightSummary,
    pub prediction: Prediction,
    /// Per-round series for each metric of the comparison chain
    pub series: Vec<Series>,
}

/// Comparison across fights, with fights that could not be summarized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub metadata: ReportMetadata,
    pub result: ComparisonResult,
    /// Fight ids skipped because their summary failed, with the reason
    pub skipped: Vec<(String, String)>,
}
