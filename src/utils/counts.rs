//! CompuBox count cells.
//!
//! Published punch-stat tables write every cell as `landed/thrown`
//! (e.g. `"12/45"`). Rounds that did not take place show `-` or nothing.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::PunchCount;

static COUNT_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$").expect("Invalid count cell regex")
});

/// Errors from parsing a count cell
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CountCellError {
    #[error("Invalid count cell '{0}': expected 'landed/thrown'")]
    Malformed(String),

    #[error("Count out of range in cell '{0}'")]
    OutOfRange(String),
}

/// Parse a `landed/thrown` cell.
///
/// Landed is not checked against thrown here; the round aggregator owns
/// that invariant.
///
/// # Examples
/// ```
/// use boxstats::utils::counts::parse_count_cell;
/// use boxstats::model::PunchCount;
///
/// assert_eq!(parse_count_cell("12/45"), Ok(PunchCount::new(12, 45)));
/// assert_eq!(parse_count_cell("-"), Ok(PunchCount::ZERO));
/// assert!(parse_count_cell("12-45").is_err());
/// ```
pub fn parse_count_cell(cell: &str) -> Result<PunchCount, CountCellError> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(PunchCount::ZERO);
    }

    let caps = COUNT_CELL
        .captures(trimmed)
        .ok_or_else(|| CountCellError::Malformed(cell.to_string()))?;

    let landed = caps[1]
        .parse::<u32>()
        .map_err(|_| CountCellError::OutOfRange(cell.to_string()))?;
    let thrown = caps[2]
        .parse::<u32>()
        .map_err(|_| CountCellError::OutOfRange(cell.to_string()))?;

    Ok(PunchCount::new(landed, thrown))
}
