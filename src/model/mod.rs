//! Record model.
//!
//! Typed representation of a fight, its two boxers and its ordered rounds of
//! punch counts. Records are immutable snapshots produced by the loader (or
//! any other caller) and only ever read by the analysis layer.

pub mod types;

pub use types::{
    ratio, Boxer, Corner, Fight, FightDuration, FightResult, PunchCategory, PunchCount,
    PunchStats, Round, Stance, WinMethod, STANDARD_ROUND_LENGTH,
};
