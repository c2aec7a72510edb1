//! Fight file loading.
//!
//! Fights are stored one per file, as YAML or JSON. Punch counts may be
//! written either as `{landed, thrown}` maps or as CompuBox `landed/thrown`
//! cells. Structural problems are rejected here; landed exceeding thrown is
//! only reported, since the round aggregator rejects it anyway.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info, warn};

use crate::model::{Corner, Fight};

/// Problems with the structure of a fight file
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FightFileError {
    #[error("Unsupported fight file '{0}': expected a .yaml, .yml or .json extension")]
    UnsupportedFormat(String),

    #[error("Fight '{fight}': scheduled_rounds must be at least 1")]
    NoScheduledRounds { fight: String },

    #[error("Fight '{fight}': both corners use boxer id '{id}'")]
    DuplicateBoxer { fight: String, id: String },

    #[error("Fight '{fight}': expected round {expected}, found round {found}")]
    RoundNumbering { fight: String, expected: u32, found: u32 },

    #[error("Fight '{fight}': {present} rounds recorded but only {scheduled} scheduled")]
    TooManyRounds { fight: String, present: u32, scheduled: u32 },

    #[error(
        "Fight '{fight}': rounds_completed ({completed}) exceeds scheduled_rounds ({scheduled})"
    )]
    CompletedExceedsScheduled { fight: String, completed: u32, scheduled: u32 },

    #[error("Fight '{fight}': rounds_completed ({completed}) is below {present} rounds recorded")]
    CompletedBelowRecorded { fight: String, completed: u32, present: u32 },

    #[error("Fight '{fight}': round {round} {corner} ring control {value} is outside 0-100")]
    RingControlOutOfRange { fight: String, round: u32, corner: Corner, value: f64 },
}

/// Supported fight file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightFormat {
    Yaml,
    Json,
}

impl FightFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, FightFileError> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "yaml" || ext == "yml" => Ok(FightFormat::Yaml),
            Some(ext) if ext == "json" => Ok(FightFormat::Json),
            _ => Err(FightFileError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Check the structure of a fight record
pub fn validate_fight(fight: &Fight) -> Result<(), FightFileError> {
    let id = &fight.id;
    let scheduled = fight.duration.scheduled_rounds;

    if scheduled == 0 {
        return Err(FightFileError::NoScheduledRounds { fight: id.clone() });
    }

    if fight.red.id == fight.blue.id {
        return Err(FightFileError::DuplicateBoxer {
            fight: id.clone(),
            id: fight.red.id.clone(),
        });
    }

    for (expected, round) in (1u32..).zip(&fight.rounds) {
        if round.number != expected {
            return Err(FightFileError::RoundNumbering {
                fight: id.clone(),
                expected,
                found: round.number,
            });
        }
    }

    let present = fight.rounds.len() as u32;
    if present > scheduled {
        return Err(FightFileError::TooManyRounds {
            fight: id.clone(),
            present,
            scheduled,
        });
    }

    if let Some(completed) = fight.duration.rounds_completed {
        if completed > scheduled {
            return Err(FightFileError::CompletedExceedsScheduled {
                fight: id.clone(),
                completed,
                scheduled,
            });
        }
        if completed < present {
            return Err(FightFileError::CompletedBelowRecorded {
                fight: id.clone(),
                completed,
                present,
            });
        }
    }

    for round in &fight.rounds {
        for corner in Corner::BOTH {
            let stats = round.corner(corner);
            if let Some(value) = stats.ring_control {
                if !(0.0..=100.0).contains(&value) {
                    return Err(FightFileError::RingControlOutOfRange {
                        fight: id.clone(),
                        round: round.number,
                        corner,
                        value,
                    });
                }
            }
            if let Some((category, count)) = stats.first_violation() {
                warn!(
                    "Fight '{}' round {}: {} corner landed {} {} punches (landed exceeds thrown)",
                    id, round.number, corner, count, category
                );
            }
        }
    }

    Ok(())
}

/// Parse a fight from text in the given format
pub fn parse_fight(content: &str, format: FightFormat) -> Result<Fight> {
    let fight: Fight = match format {
        FightFormat::Yaml => serde_yaml::from_str(content).wrap_err("Failed to parse YAML fight")?,
        FightFormat::Json => serde_json::from_str(content).wrap_err("Failed to parse JSON fight")?,
    };

    validate_fight(&fight)?;
    Ok(fight)
}

/// Load one fight file
pub fn load_fight(path: &Path) -> Result<Fight> {
    info!("Loading fight from: {:?}", path);

    let format = FightFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read fight file '{}'", path.display()))?;

    let fight = parse_fight(&content, format)
        .wrap_err_with(|| format!("Invalid fight file '{}'", path.display()))?;

    debug!(
        "Loaded fight '{}' ({} rounds recorded)",
        fight.id,
        fight.rounds.len()
    );
    Ok(fight)
}

/// Load several fight files, in the order given
pub fn load_fights(paths: &[PathBuf]) -> Result<Vec<Fight>> {
    let fights = paths
        .iter()
        .map(|path| load_fight(path))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for fight in &fights {
        if !seen.insert(fight.id.as_str()) {
            warn!("Fight id '{}' appears in more than one file", fight.id);
        }
    }

    info!("Loaded {} fights", fights.len());
    Ok(fights)
}
