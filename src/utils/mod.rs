//! Shared utilities: CompuBox count cell parsing.

pub mod counts;

pub use counts::{parse_count_cell, CountCellError};
