//! Typed failures of the statistics engine.
//!
//! All errors are reported synchronously to the caller. None of them are
//! worth retrying: the computations are pure, so the same input fails the
//! same way every time.

use crate::model::{Corner, PunchCategory};

/// Errors raised by the round aggregator, summarizer, comparison engine and
/// metric registry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error(
        "Round {round}: {corner} corner landed {landed} of {thrown} {category} punches \
         (landed exceeds thrown)"
    )]
    InvariantViolation {
        round: u32,
        corner: Corner,
        category: PunchCategory,
        landed: u32,
        thrown: u32,
    },

    #[error("Incomplete data: {0}")]
    DataIncomplete(String),

    #[error("Punch count overflow: {0}")]
    CountOverflow(String),

    #[error("Metric '{0}' is already registered")]
    DuplicateMetric(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}
