//! # Metric Registry
//!
//! Declarative catalog of the metrics the summarizer output can be ranked
//! and charted by. Each entry is a `MetricDefinition`: a unique name, an
//! extractor over a `StatLine`, a unit and a polarity.
//!
//! ## Lifecycle
//!
//! 1. **Registration**: definitions are added to a `MetricRegistryBuilder`,
//!    which rejects duplicate names and extractors that are not total.
//! 2. **Freeze**: `build()` returns an immutable `MetricRegistry`.
//! 3. **Use**: the registry is passed by reference to whatever needs it.
//!    It is never modified afterwards, so it can be shared across threads
//!    without locking.
//!
//! `MetricRegistry::standard()` is the process-wide built-in catalog.
//! Other catalogs are assembled through `MetricRegistry::builder()`.
//!
//! ## Totality check
//!
//! An extractor must not fail or produce NaN on data a summary can
//! legitimately contain. At registration it runs on an all-zero line
//! (every category present, nothing thrown) and a sparse line (optional
//! categories, opponent and ring control absent). Each run must yield a
//! finite value, an undefined marker or a missing-data marker.

pub mod metric;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::types::{PunchTotals, StatLine};
use crate::error::StatsError;
use crate::model::PunchCount;

pub use metric::{Extraction, Extractor, MetricDefinition, MetricKind, Polarity, Unit};

static STANDARD: LazyLock<MetricRegistry> = LazyLock::new(|| {
    MetricRegistry::from_kinds(MetricKind::ALL).expect("Invalid built-in metric catalog")
});

/// Immutable catalog of metric definitions
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    definitions: Vec<MetricDefinition>,
    by_name: HashMap<String, usize>,
}

impl MetricRegistry {
    pub fn builder() -> MetricRegistryBuilder {
        MetricRegistryBuilder::default()
    }

    /// Built-in catalog with every `MetricKind`, initialized once
    pub fn standard() -> &'static MetricRegistry {
        &STANDARD
    }

    /// Catalog of the given built-in kinds under their canonical names
    pub fn from_kinds(kinds: impl IntoIterator<Item = MetricKind>) -> Result<Self, StatsError> {
        kinds
            .into_iter()
            .try_fold(Self::builder(), |builder, kind| {
                builder.register(MetricDefinition::builtin(kind))
            })
            .map(MetricRegistryBuilder::build)
    }

    pub fn get(&self, name: &str) -> Option<&MetricDefinition> {
        self.by_name.get(name).map(|&i| &self.definitions[i])
    }

    /// Look up a metric, failing with `UnknownMetric`
    pub fn require(&self, name: &str) -> Result<&MetricDefinition, StatsError> {
        self.get(name)
            .ok_or_else(|| StatsError::UnknownMetric(name.to_string()))
    }

    /// Resolve an ordered list of names into a comparison chain
    pub fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<&MetricDefinition>, StatsError> {
        names.iter().map(|name| self.require(name.as_ref())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Collects and validates definitions before freezing them
#[derive(Debug, Default)]
pub struct MetricRegistryBuilder {
    definitions: Vec<MetricDefinition>,
    by_name: HashMap<String, usize>,
}

impl MetricRegistryBuilder {
    /// Add a definition.
    ///
    /// Fails with `DuplicateMetric` when the name is taken and with
    /// `InvalidMetric` when the name is empty or the extractor is not total.
    pub fn register(mut self, definition: MetricDefinition) -> Result<Self, StatsError> {
        if definition.name.trim().is_empty() {
            return Err(StatsError::InvalidMetric("metric name cannot be empty".to_string()));
        }
        if self.by_name.contains_key(&definition.name) {
            return Err(StatsError::DuplicateMetric(definition.name));
        }
        check_totality(&definition)?;

        log::debug!("Registered metric '{}' ({})", definition.name, definition.unit);
        self.by_name
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(self)
    }

    pub fn build(self) -> MetricRegistry {
        MetricRegistry {
            definitions: self.definitions,
            by_name: self.by_name,
        }
    }
}

fn totality_lines() -> [StatLine; 2] {
    let zero = PunchTotals {
        total: PunchCount::ZERO,
        jabs: Some(PunchCount::ZERO),
        power: Some(PunchCount::ZERO),
        significant: Some(PunchCount::ZERO),
        head_landed: Some(0),
        body_landed: Some(0),
    };
    let all_zero = StatLine {
        totals: zero.clone(),
        opponent: Some(zero),
        minutes: 0.0,
        rounds: 0,
        ring_control: Some(0.0),
    };
    [all_zero, StatLine::default()]
}

fn check_totality(definition: &MetricDefinition) -> Result<(), StatsError> {
    for line in totality_lines() {
        if let Extraction::Value(v) = definition.extract_raw(&line) {
            if !v.is_finite() {
                return Err(StatsError::InvalidMetric(format!(
                    "extractor of '{}' returned {} instead of an undefined marker",
                    definition.name, v
                )));
            }
        }
    }
    Ok(())
}
