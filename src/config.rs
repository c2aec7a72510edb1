use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::compare::{ComparisonEngine, DEFAULT_TIE_EPSILON};
use crate::analysis::summary::SummarySettings;
use crate::analysis::types::ComparisonScope;
use crate::error::StatsError;
use crate::model::STANDARD_ROUND_LENGTH;
use crate::registry::{MetricDefinition, MetricKind, MetricRegistry, MetricRegistryBuilder};

/// Analysis configuration that mirrors the YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Metric catalog, in listing order
    #[serde(default = "default_metric_entries")]
    pub metrics: Vec<MetricEntry>,
    #[serde(default)]
    pub compare: CompareConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            metrics: default_metric_entries(),
            compare: CompareConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.general.round_length.is_zero() {
            return Err(ValidationError::InvalidGeneral(
                "round_length must be greater than zero".to_string(),
            ));
        }

        let epsilon = self.general.tie_epsilon;
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ValidationError::InvalidGeneral(format!(
                "tie_epsilon must be a finite, non-negative number (got {})",
                epsilon
            )));
        }

        if self.metrics.is_empty() {
            return Err(ValidationError::InvalidMetrics(
                "metric catalog cannot be empty".to_string(),
            ));
        }

        if self.compare.metrics.is_empty() {
            return Err(ValidationError::InvalidCompare(
                "at least one comparison metric is required".to_string(),
            ));
        }

        for name in &self.compare.metrics {
            if !self.metrics.iter().any(|entry| entry.registered_name() == name) {
                return Err(ValidationError::InvalidCompare(format!(
                    "comparison metric '{}' is not in the metric catalog",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn summary_settings(&self) -> SummarySettings {
        SummarySettings {
            round_length: self.general.round_length,
        }
    }

    pub fn comparison_engine(&self) -> ComparisonEngine {
        ComparisonEngine::new(self.general.tie_epsilon, self.compare.scope)
    }

    /// Build the configured metric catalog, in configured order
    pub fn registry(&self) -> Result<MetricRegistry, StatsError> {
        self.metrics
            .iter()
            .try_fold(MetricRegistry::builder(), |builder, entry| {
                builder.register(entry.definition())
            })
            .map(MetricRegistryBuilder::build)
    }
}

/// General analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Round length used for work rates (e.g. "3m")
    #[serde(default = "default_round_length", with = "humantime_serde")]
    pub round_length: Duration,
    /// Values closer than this tie in comparisons
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            round_length: default_round_length(),
            tie_epsilon: default_tie_epsilon(),
            log_level: None,
        }
    }
}

/// One entry of the metric catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub metric: MetricKind,
    /// (Optional) Name to register the metric under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MetricEntry {
    /// Name the metric will be registered under
    pub fn registered_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.metric.name())
    }

    /// Built-in definition under the registered name
    pub fn definition(&self) -> MetricDefinition {
        MetricDefinition::builtin(self.metric).with_name(self.registered_name())
    }
}

/// Default comparison settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default)]
    pub scope: ComparisonScope,
    /// Metric chain, primary first
    #[serde(default = "default_compare_metrics")]
    pub metrics: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            scope: ComparisonScope::default(),
            metrics: default_compare_metrics(),
        }
    }
}

fn default_round_length() -> Duration {
    STANDARD_ROUND_LENGTH
}

fn default_tie_epsilon() -> f64 {
    DEFAULT_TIE_EPSILON
}

fn default_metric_entries() -> Vec<MetricEntry> {
    MetricKind::ALL
        .into_iter()
        .map(|metric| MetricEntry { metric, name: None })
        .collect()
}

fn default_compare_metrics() -> Vec<String> {
    vec![MetricKind::Accuracy.name().to_string()]
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid metric catalog: {0}")]
    InvalidMetrics(String),
    #[error("Invalid compare configuration: {0}")]
    InvalidCompare(String),
}
