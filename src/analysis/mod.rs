//! Punch statistics analysis.
//!
//! This module turns fight records into round metrics, whole-fight
//! summaries, ranked comparisons, winner predictions and chart series.

pub mod types;
pub mod rounds;
pub mod summary;
pub mod compare;
pub mod verdict;
pub mod series;
pub mod report;

pub use types::*;
pub use rounds::{aggregate_rounds, compute_round_metrics, validate_round};
pub use summary::{round_minutes, summarize, summarize_all, summarize_fight, SummarySettings};
pub use compare::{compare, ComparisonEngine, DEFAULT_TIE_EPSILON};
pub use verdict::{describe_prediction, predict_winner};
pub use series::{cumulative_series, round_series};
pub use report::{
    create_metadata, generate_comparison_text_report, generate_fight_text_report,
    generate_json_report,
};
