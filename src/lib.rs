//! # Boxstats - Punch statistics aggregation and comparison
//!
//! This library turns round-by-round punch counts into per-round metrics,
//! whole-fight summaries and ranked comparisons across fighters and fights.
//!
//! ## Overview
//!
//! A fight is an ordered list of rounds; each round carries landed and
//! thrown counts for both corners, broken down into total, jab, power and
//! significant punches when the source records them. Everything derived
//! from those counts is computed from the counts themselves: a fight's
//! accuracy is total landed over total thrown, never an average of round
//! accuracies.
//!
//! ## Key Features
//!
//! - **Round metrics**: accuracy per category, landed differential and running totals
//! - **Fight summaries**: totals, work rate, rounds won and the round trend
//! - **Comparisons**: competition ranking with configurable tie tolerance and tie-break chains
//! - **Metric catalog**: closed set of named metrics with units and sort direction
//! - **Reports**: JSON and fixed-width text reports, chart-ready series
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `model`: Fight, round and punch count records
//! - `analysis`: Round aggregation, summaries, comparisons, predictions and reports
//! - `registry`: Metric definitions and the immutable metric catalog
//! - `config`: Typed analysis configuration and validation
//! - `config_loader`: Configuration file loading
//! - `loader`: Fight files in YAML or JSON
//! - `generate`: Sample fight generation
//! - `error`: Typed statistics errors
//! - `utils`: CompuBox count cell parsing
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use boxstats::{analysis, config_loader, loader};
//!
//! let config = config_loader::load_config_or_default(None)?;
//! let registry = config.registry()?;
//!
//! let fights = loader::load_fights(&[
//!     Path::new("fights/davis-garcia.yaml").to_path_buf(),
//!     Path::new("fights/lewis-thompson.json").to_path_buf(),
//! ])?;
//!
//! let summaries = analysis::summarize_all(&fights, &config.summary_settings())
//!     .into_iter()
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let result = config
//!     .comparison_engine()
//!     .compare(&summaries, registry.require("accuracy")?);
//! for entry in result.ranked() {
//!     println!("{:?} {}", entry.rank(), entry.label());
//! }
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Fight File Format
//!
//! ```yaml
//! id: lewis-thompson
//! red: { id: lewis, name: Lightning Lewis }
//! blue: { id: thompson, name: Thunder Thompson }
//! duration:
//!   scheduled_rounds: 12
//! rounds:
//!   - number: 1
//!     red: { total: "18/52", significant: "11/30", ring_control: 55.0 }
//!     blue: { total: { landed: 14, thrown: 61 }, ring_control: 45.0 }
//! ```
//!
//! ## Error Handling
//!
//! The computations return `StatsError` values that callers can match on.
//! File-facing functions use `color_eyre` for error reporting with context.

pub mod error;
pub mod model;
pub mod analysis;
pub mod registry;
pub mod config;
pub mod config_loader;
pub mod loader;
pub mod generate;
pub mod utils;

pub use error::StatsError;
