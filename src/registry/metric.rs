//! Metric definitions.
//!
//! Every supported metric is a variant of the closed `MetricKind` enum. A
//! kind resolves to its `MetricDefinition` through one exhaustive match, so
//! adding a metric without a formula, unit or polarity does not compile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::types::StatLine;
use crate::error::StatsError;
use crate::model::{ratio, PunchCategory};

/// Outcome of applying an extractor to a stat line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extraction {
    Value(f64),
    /// Defined data, but no meaningful value (e.g. accuracy of zero thrown)
    Undefined,
    /// The metric needs a field the source did not record
    Missing(&'static str),
}

impl From<Option<f64>> for Extraction {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Extraction::Value(v),
            None => Extraction::Undefined,
        }
    }
}

/// Extractor function reading a metric value from a stat line
pub type Extractor = fn(&StatLine) -> Extraction;

/// Unit a metric is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Dimensionless 0..1 ratio
    Ratio,
    PunchesPerMinute,
    Punches,
    Percent,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Ratio => write!(f, "ratio"),
            Unit::PunchesPerMinute => write!(f, "punches/min"),
            Unit::Punches => write!(f, "punches"),
            Unit::Percent => write!(f, "%"),
        }
    }
}

/// Sort direction of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Built-in metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Accuracy,
    WorkRate,
    PowerPunchShare,
    LandedPerMinute,
    PunchesLanded,
    PunchesThrown,
    LandedDifferential,
    JabAccuracy,
    PowerAccuracy,
    SignificantAccuracy,
    SignificantLanded,
    OpponentAccuracy,
    AccuracyMargin,
    BodyShare,
    RingControl,
}

impl MetricKind {
    /// Every built-in metric in catalog order
    pub const ALL: [MetricKind; 15] = [
        MetricKind::Accuracy,
        MetricKind::WorkRate,
        MetricKind::PowerPunchShare,
        MetricKind::LandedPerMinute,
        MetricKind::PunchesLanded,
        MetricKind::PunchesThrown,
        MetricKind::LandedDifferential,
        MetricKind::JabAccuracy,
        MetricKind::PowerAccuracy,
        MetricKind::SignificantAccuracy,
        MetricKind::SignificantLanded,
        MetricKind::OpponentAccuracy,
        MetricKind::AccuracyMargin,
        MetricKind::BodyShare,
        MetricKind::RingControl,
    ];

    /// Canonical registry name
    pub fn name(self) -> &'static str {
        self.descriptor().0
    }

    fn descriptor(self) -> (&'static str, &'static str, Unit, Polarity, Extractor) {
        use Polarity::*;
        use Unit::*;

        match self {
            MetricKind::Accuracy => ("accuracy", "Punch accuracy", Ratio, HigherIsBetter, accuracy),
            MetricKind::WorkRate => (
                "work_rate",
                "Punches thrown per minute",
                PunchesPerMinute,
                HigherIsBetter,
                work_rate,
            ),
            MetricKind::PowerPunchShare => (
                "power_punch_share",
                "Power share of punches landed",
                Ratio,
                HigherIsBetter,
                power_punch_share,
            ),
            MetricKind::LandedPerMinute => (
                "landed_per_minute",
                "Punches landed per minute",
                PunchesPerMinute,
                HigherIsBetter,
                landed_per_minute,
            ),
            MetricKind::PunchesLanded => (
                "punches_landed",
                "Total punches landed",
                Punches,
                HigherIsBetter,
                punches_landed,
            ),
            MetricKind::PunchesThrown => (
                "punches_thrown",
                "Total punches thrown",
                Punches,
                HigherIsBetter,
                punches_thrown,
            ),
            MetricKind::LandedDifferential => (
                "landed_differential",
                "Landed minus opponent landed",
                Punches,
                HigherIsBetter,
                landed_differential,
            ),
            MetricKind::JabAccuracy => (
                "jab_accuracy",
                "Jab accuracy",
                Ratio,
                HigherIsBetter,
                jab_accuracy,
            ),
            MetricKind::PowerAccuracy => (
                "power_accuracy",
                "Power punch accuracy",
                Ratio,
                HigherIsBetter,
                power_accuracy,
            ),
            MetricKind::SignificantAccuracy => (
                "significant_accuracy",
                "Significant punch accuracy",
                Ratio,
                HigherIsBetter,
                significant_accuracy,
            ),
            MetricKind::SignificantLanded => (
                "significant_landed",
                "Significant punches landed",
                Punches,
                HigherIsBetter,
                significant_landed,
            ),
            MetricKind::OpponentAccuracy => (
                "opponent_accuracy",
                "Opponent accuracy (defense)",
                Ratio,
                LowerIsBetter,
                opponent_accuracy,
            ),
            MetricKind::AccuracyMargin => (
                "accuracy_margin",
                "Accuracy minus opponent accuracy",
                Ratio,
                HigherIsBetter,
                accuracy_margin,
            ),
            MetricKind::BodyShare => (
                "body_share",
                "Body share of significant landed",
                Ratio,
                HigherIsBetter,
                body_share,
            ),
            MetricKind::RingControl => (
                "ring_control",
                "Mean ring control",
                Percent,
                HigherIsBetter,
                ring_control,
            ),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn category_accuracy(line: &StatLine, category: PunchCategory, field: &'static str) -> Extraction {
    match line.totals.category(category) {
        Some(count) => count.accuracy().into(),
        None => Extraction::Missing(field),
    }
}

fn accuracy(line: &StatLine) -> Extraction {
    line.accuracy().into()
}

fn work_rate(line: &StatLine) -> Extraction {
    line.work_rate().into()
}

fn landed_per_minute(line: &StatLine) -> Extraction {
    line.landed_per_minute().into()
}

fn punches_landed(line: &StatLine) -> Extraction {
    Extraction::Value(line.totals.total.landed as f64)
}

fn punches_thrown(line: &StatLine) -> Extraction {
    Extraction::Value(line.totals.total.thrown as f64)
}

fn power_punch_share(line: &StatLine) -> Extraction {
    match line.totals.power {
        Some(power) => ratio(power.landed as f64, line.totals.total.landed as f64).into(),
        None => Extraction::Missing("power"),
    }
}

fn landed_differential(line: &StatLine) -> Extraction {
    match &line.opponent {
        Some(opponent) => {
            Extraction::Value(line.totals.total.landed as f64 - opponent.total.landed as f64)
        }
        None => Extraction::Undefined,
    }
}

fn jab_accuracy(line: &StatLine) -> Extraction {
    category_accuracy(line, PunchCategory::Jab, "jabs")
}

fn power_accuracy(line: &StatLine) -> Extraction {
    category_accuracy(line, PunchCategory::Power, "power")
}

fn significant_accuracy(line: &StatLine) -> Extraction {
    category_accuracy(line, PunchCategory::Significant, "significant")
}

fn significant_landed(line: &StatLine) -> Extraction {
    match line.totals.significant {
        Some(count) => Extraction::Value(count.landed as f64),
        None => Extraction::Missing("significant"),
    }
}

fn opponent_accuracy(line: &StatLine) -> Extraction {
    match &line.opponent {
        Some(opponent) => opponent.total.accuracy().into(),
        None => Extraction::Undefined,
    }
}

fn accuracy_margin(line: &StatLine) -> Extraction {
    let own = line.accuracy();
    let against = line.opponent.as_ref().and_then(|o| o.total.accuracy());
    match (own, against) {
        (Some(own), Some(against)) => Extraction::Value(own - against),
        _ => Extraction::Undefined,
    }
}

fn body_share(line: &StatLine) -> Extraction {
    match (line.totals.head_landed, line.totals.body_landed) {
        (Some(head), Some(body)) => ratio(body as f64, head as f64 + body as f64).into(),
        _ => Extraction::Missing("head_landed/body_landed"),
    }
}

fn ring_control(line: &StatLine) -> Extraction {
    match line.ring_control {
        Some(value) => Extraction::Value(value),
        None => Extraction::Missing("ring_control"),
    }
}

/// A named metric: how to extract it, its unit and which way is better
#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    /// Built-in kind, `None` for custom metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetricKind>,
    pub name: String,
    pub label: String,
    pub unit: Unit,
    pub polarity: Polarity,
    #[serde(skip)]
    extractor: Extractor,
}

impl MetricDefinition {
    /// Definition of a built-in metric under its canonical name
    pub fn builtin(kind: MetricKind) -> Self {
        let (name, label, unit, polarity, extractor) = kind.descriptor();
        Self {
            kind: Some(kind),
            name: name.to_string(),
            label: label.to_string(),
            unit,
            polarity,
            extractor,
        }
    }

    /// Custom metric with its own extractor
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        unit: Unit,
        polarity: Polarity,
        extractor: Extractor,
    ) -> Self {
        Self {
            kind: None,
            name: name.into(),
            label: label.into(),
            unit,
            polarity,
            extractor,
        }
    }

    /// Register under a different name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn higher_is_better(&self) -> bool {
        self.polarity == Polarity::HigherIsBetter
    }

    /// Raw extractor output; non-finite values count as undefined
    pub fn extract(&self, line: &StatLine) -> Extraction {
        match (self.extractor)(line) {
            Extraction::Value(v) if !v.is_finite() => Extraction::Undefined,
            other => other,
        }
    }

    /// Metric value of a stat line.
    ///
    /// `Ok(None)` marks an undefined value; a metric over a category the
    /// source never recorded fails with `DataIncomplete`.
    pub fn evaluate(&self, line: &StatLine) -> Result<Option<f64>, StatsError> {
        match self.extract(line) {
            Extraction::Value(v) => Ok(Some(v)),
            Extraction::Undefined => Ok(None),
            Extraction::Missing(field) => Err(StatsError::DataIncomplete(format!(
                "metric '{}' requires '{}' data",
                self.name, field
            ))),
        }
    }

    /// Run the extractor unfiltered, used by registration checks
    pub(crate) fn extract_raw(&self, line: &StatLine) -> Extraction {
        (self.extractor)(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::PunchTotals;
    use crate::model::PunchCount;

    fn line(landed: u32, thrown: u32, opponent: Option<(u32, u32)>) -> StatLine {
        StatLine {
            totals: PunchTotals {
                total: PunchCount::new(landed, thrown),
                ..PunchTotals::default()
            },
            opponent: opponent.map(|(l, t)| PunchTotals {
                total: PunchCount::new(l, t),
                ..PunchTotals::default()
            }),
            minutes: 9.0,
            rounds: 3,
            ring_control: None,
        }
    }

    #[test]
    fn test_names_are_unique_and_stable() {
        let names: std::collections::HashSet<&str> =
            MetricKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), MetricKind::ALL.len());
        assert_eq!(MetricKind::WorkRate.name(), "work_rate");
        assert_eq!(MetricKind::PowerPunchShare.to_string(), "power_punch_share");
    }

    #[test]
    fn test_basic_extractors() {
        let l = line(30, 90, Some((20, 100)));
        let eval = |kind| MetricDefinition::builtin(kind).evaluate(&l).unwrap();

        assert_eq!(eval(MetricKind::WorkRate), Some(10.0));
        assert_eq!(eval(MetricKind::PunchesLanded), Some(30.0));
        assert_eq!(eval(MetricKind::LandedDifferential), Some(10.0));
        assert_eq!(eval(MetricKind::OpponentAccuracy), Some(0.2));
        assert!((eval(MetricKind::AccuracyMargin).unwrap() - (1.0 / 3.0 - 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_category_is_data_incomplete() {
        let l = line(30, 90, None);
        let err = MetricDefinition::builtin(MetricKind::PowerPunchShare)
            .evaluate(&l)
            .unwrap_err();
        assert!(matches!(err, StatsError::DataIncomplete(_)));

        // No opponent (fight scope) is undefined, not an error
        assert_eq!(
            MetricDefinition::builtin(MetricKind::OpponentAccuracy).evaluate(&l),
            Ok(None)
        );
    }

    #[test]
    fn test_power_punch_share() {
        let mut l = line(40, 100, None);
        l.totals.power = Some(PunchCount::new(30, 50));
        assert_eq!(
            MetricDefinition::builtin(MetricKind::PowerPunchShare).evaluate(&l),
            Ok(Some(0.75))
        );

        let mut none_landed = line(0, 100, None);
        none_landed.totals.power = Some(PunchCount::new(0, 50));
        assert_eq!(
            MetricDefinition::builtin(MetricKind::PowerPunchShare).evaluate(&none_landed),
            Ok(None)
        );
    }

    #[test]
    fn test_body_share_sums_in_floating_point() {
        let mut l = line(0, 0, None);
        l.totals.head_landed = Some(u32::MAX);
        l.totals.body_landed = Some(u32::MAX);
        assert_eq!(
            MetricDefinition::builtin(MetricKind::BodyShare).evaluate(&l),
            Ok(Some(0.5))
        );
    }

    #[test]
    fn test_non_finite_value_is_undefined() {
        fn broken(_: &StatLine) -> Extraction {
            Extraction::Value(f64::NAN)
        }
        let metric = MetricDefinition::new(
            "broken",
            "Broken",
            Unit::Ratio,
            Polarity::HigherIsBetter,
            broken,
        );
        assert_eq!(metric.extract(&StatLine::default()), Extraction::Undefined);
        assert!(matches!(
            metric.extract_raw(&StatLine::default()),
            Extraction::Value(v) if v.is_nan()
        ));
    }
}
