//! Core record types: boxers, rounds, punch counts and fights.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::counts::{parse_count_cell, CountCellError};

/// Standard professional round length (3 minutes)
pub const STANDARD_ROUND_LENGTH: Duration = Duration::from_secs(180);

/// Ratio of two quantities, undefined when the denominator is zero
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Corner a boxer fights out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Red,
    Blue,
}

impl Corner {
    /// Both corners, red first
    pub const BOTH: [Corner; 2] = [Corner::Red, Corner::Blue];

    pub fn opponent(self) -> Corner {
        match self {
            Corner::Red => Corner::Blue,
            Corner::Blue => Corner::Red,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corner::Red => write!(f, "red"),
            Corner::Blue => write!(f, "blue"),
        }
    }
}

/// Boxing stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Orthodox,
    Southpaw,
    Switch,
}

/// A boxer as identified in the source data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boxer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance: Option<Stance>,
}

impl Boxer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight_class: None,
            stance: None,
        }
    }
}

/// Punch category tracked by CompuBox-style statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchCategory {
    Total,
    Jab,
    Power,
    Significant,
}

impl PunchCategory {
    pub const ALL: [PunchCategory; 4] = [
        PunchCategory::Total,
        PunchCategory::Jab,
        PunchCategory::Power,
        PunchCategory::Significant,
    ];
}

impl fmt::Display for PunchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PunchCategory::Total => write!(f, "total"),
            PunchCategory::Jab => write!(f, "jab"),
            PunchCategory::Power => write!(f, "power"),
            PunchCategory::Significant => write!(f, "significant"),
        }
    }
}

/// Landed and thrown counts for one category.
///
/// Deserializes from either a `{landed, thrown}` map or a CompuBox cell
/// string such as `"12/45"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CountRepr")]
pub struct PunchCount {
    pub landed: u32,
    pub thrown: u32,
}

impl PunchCount {
    pub const ZERO: PunchCount = PunchCount { landed: 0, thrown: 0 };

    pub fn new(landed: u32, thrown: u32) -> Self {
        Self { landed, thrown }
    }

    /// landed / thrown, `None` when nothing was thrown
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.landed as f64, self.thrown as f64)
    }

    /// Punches thrown that did not land, `None` when landed exceeds thrown
    pub fn missed(&self) -> Option<u32> {
        self.thrown.checked_sub(self.landed)
    }

    pub fn is_consistent(&self) -> bool {
        self.landed <= self.thrown
    }

    /// Component-wise sum, `None` when either count leaves the `u32` range
    pub fn checked_add(self, rhs: PunchCount) -> Option<PunchCount> {
        Some(PunchCount {
            landed: self.landed.checked_add(rhs.landed)?,
            thrown: self.thrown.checked_add(rhs.thrown)?,
        })
    }
}

impl fmt::Display for PunchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.landed, self.thrown)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Cell(String),
    Map { landed: u32, thrown: u32 },
}

impl TryFrom<CountRepr> for PunchCount {
    type Error = CountCellError;

    fn try_from(repr: CountRepr) -> Result<Self, Self::Error> {
        match repr {
            CountRepr::Cell(cell) => parse_count_cell(&cell),
            CountRepr::Map { landed, thrown } => Ok(PunchCount { landed, thrown }),
        }
    }
}

/// Punch statistics of one boxer in one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PunchStats {
    pub total: PunchCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jabs: Option<PunchCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PunchCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant: Option<PunchCount>,
    /// Significant punches landed to the head
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_landed: Option<u32>,
    /// Significant punches landed to the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_landed: Option<u32>,
    /// Share of the round spent controlling the ring (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_control: Option<f64>,
}

impl PunchStats {
    pub fn new(total: PunchCount) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Counts for a category, `None` when the source did not record it
    pub fn category(&self, category: PunchCategory) -> Option<PunchCount> {
        match category {
            PunchCategory::Total => Some(self.total),
            PunchCategory::Jab => self.jabs,
            PunchCategory::Power => self.power,
            PunchCategory::Significant => self.significant,
        }
    }

    /// Recorded categories, total first
    pub fn categories(&self) -> impl Iterator<Item = (PunchCategory, PunchCount)> + '_ {
        PunchCategory::ALL
            .into_iter()
            .filter_map(move |category| self.category(category).map(|count| (category, count)))
    }

    /// First category where landed exceeds thrown
    pub fn first_violation(&self) -> Option<(PunchCategory, PunchCount)> {
        self.categories().find(|(_, count)| !count.is_consistent())
    }
}

/// One round of a fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Position in the fight, starting at 1
    pub number: u32,
    pub red: PunchStats,
    pub blue: PunchStats,
}

impl Round {
    pub fn new(number: u32, red: PunchStats, blue: PunchStats) -> Self {
        Self { number, red, blue }
    }

    pub fn corner(&self, corner: Corner) -> &PunchStats {
        match corner {
            Corner::Red => &self.red,
            Corner::Blue => &self.blue,
        }
    }
}

/// Scheduled and actual length of a fight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FightDuration {
    pub scheduled_rounds: u32,
    /// Rounds actually fought; defaults to the number of recorded rounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds_completed: Option<u32>,
    /// Overrides the configured round length (e.g. "2m" for women's bouts)
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub round_length: Option<Duration>,
    /// Total elapsed fight time, overrides rounds x round length
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Duration>,
}

/// How a fight was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinMethod {
    Decision,
    Knockout,
    TechnicalKnockout,
    Disqualification,
    Retirement,
}

/// Official result of a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FightResult {
    Win {
        winner: Corner,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<WinMethod>,
    },
    Draw,
    NoContest,
}

/// A fight between two boxers with its round-by-round statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fight {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub red: Boxer,
    pub blue: Boxer,
    pub duration: FightDuration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<FightResult>,
    pub rounds: Vec<Round>,
}

impl Fight {
    pub fn boxer(&self, corner: Corner) -> &Boxer {
        match corner {
            Corner::Red => &self.red,
            Corner::Blue => &self.blue,
        }
    }

    /// Title if given, otherwise "Red vs Blue"
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("{} vs {}", self.red.name, self.blue.name),
        }
    }

    pub fn rounds_completed(&self) -> u32 {
        self.duration
            .rounds_completed
            .unwrap_or(self.rounds.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punch_count_accuracy() {
        assert_eq!(PunchCount::new(5, 10).accuracy(), Some(0.5));
        assert_eq!(PunchCount::new(0, 10).accuracy(), Some(0.0));
        assert_eq!(PunchCount::ZERO.accuracy(), None);
        assert_eq!(PunchCount::new(11, 10).missed(), None);
    }

    #[test]
    fn test_punch_count_checked_add() {
        assert_eq!(
            PunchCount::new(5, 10).checked_add(PunchCount::new(7, 20)),
            Some(PunchCount::new(12, 30))
        );
        let big = PunchCount::new(3_000_000_000, 3_000_000_000);
        assert_eq!(big.checked_add(big), None);
    }

    #[test]
    fn test_punch_count_deserializes_from_cell_or_map() {
        let from_cell: PunchCount = serde_yaml::from_str("\"12/45\"").unwrap();
        let from_map: PunchCount = serde_yaml::from_str("{landed: 12, thrown: 45}").unwrap();
        assert_eq!(from_cell, PunchCount::new(12, 45));
        assert_eq!(from_cell, from_map);

        assert!(serde_yaml::from_str::<PunchCount>("\"twelve\"").is_err());
    }

    #[test]
    fn test_first_violation_reports_category() {
        let mut stats = PunchStats::new(PunchCount::new(20, 50));
        stats.jabs = Some(PunchCount::new(5, 25));
        stats.power = Some(PunchCount::new(16, 15));
        assert_eq!(
            stats.first_violation(),
            Some((PunchCategory::Power, PunchCount::new(16, 15)))
        );

        stats.power = Some(PunchCount::new(15, 25));
        assert_eq!(stats.first_violation(), None);
    }

    #[test]
    fn test_fight_result_yaml() {
        let result: FightResult =
            serde_yaml::from_str("outcome: win\nwinner: blue\nmethod: technical_knockout").unwrap();
        assert_eq!(
            result,
            FightResult::Win {
                winner: Corner::Blue,
                method: Some(WinMethod::TechnicalKnockout)
            }
        );

        let draw: FightResult = serde_yaml::from_str("outcome: draw").unwrap();
        assert_eq!(draw, FightResult::Draw);
    }

    #[test]
    fn test_duration_round_length_humantime() {
        let duration: FightDuration =
            serde_yaml::from_str("scheduled_rounds: 10\nround_length: 2m").unwrap();
        assert_eq!(duration.round_length, Some(Duration::from_secs(120)));
        assert_eq!(duration.elapsed, None);
    }
}
