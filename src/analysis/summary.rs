//! Fight summarization.
//!
//! Reduces a fight's rounds into whole-fight totals and derived rates.
//! Overall accuracy is always recomputed from summed counts: averaging
//! per-round accuracies would weight a 10-punch round like a 100-punch one.

use std::time::Duration;

use rayon::prelude::*;

use crate::error::StatsError;
use crate::model::{Corner, Fight, STANDARD_ROUND_LENGTH};

use super::rounds::{aggregate_rounds, validate_round};
use super::types::{BoxerSummary, FightSummary, PunchTotals, RoundMetrics, StatLine};

/// Time base used to turn rounds into minutes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummarySettings {
    /// Length of a round when the fight does not override it
    pub round_length: Duration,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            round_length: STANDARD_ROUND_LENGTH,
        }
    }
}

/// Elapsed fight time in minutes.
///
/// Uses the fight's explicit elapsed time when present, otherwise
/// rounds completed x round length.
pub fn elapsed_minutes(fight: &Fight, settings: &SummarySettings) -> f64 {
    if let Some(elapsed) = fight.duration.elapsed {
        return elapsed.as_secs_f64() / 60.0;
    }
    let round_length = fight.duration.round_length.unwrap_or(settings.round_length);
    fight.rounds_completed() as f64 * round_length.as_secs_f64() / 60.0
}

/// Length of one recorded round in minutes.
///
/// An explicit elapsed time is spread evenly over the rounds completed;
/// otherwise it is the fight's round length or the configured one.
pub fn round_minutes(fight: &Fight, settings: &SummarySettings) -> f64 {
    if let Some(elapsed) = fight.duration.elapsed {
        let completed = fight.rounds_completed().max(1);
        return elapsed.as_secs_f64() / 60.0 / completed as f64;
    }
    fight
        .duration
        .round_length
        .unwrap_or(settings.round_length)
        .as_secs_f64()
        / 60.0
}

/// Summarize a fight from its precomputed round metrics.
///
/// Totals cover the rounds actually present, not the scheduled distance.
/// A fight without rounds has no summary and fails with `DataIncomplete`.
pub fn summarize(
    fight: &Fight,
    round_metrics: &[RoundMetrics],
    settings: &SummarySettings,
) -> Result<FightSummary, StatsError> {
    if fight.rounds.is_empty() {
        return Err(StatsError::DataIncomplete(format!(
            "fight '{}' has no rounds",
            fight.id
        )));
    }

    let aligned = round_metrics.len() == fight.rounds.len()
        && round_metrics
            .iter()
            .zip(&fight.rounds)
            .all(|(metrics, round)| metrics.round == round.number);
    if !aligned {
        return Err(StatsError::DataIncomplete(format!(
            "round metrics for fight '{}' do not match its {} rounds",
            fight.id,
            fight.rounds.len()
        )));
    }

    for round in &fight.rounds {
        validate_round(round)?;
    }

    let minutes = elapsed_minutes(fight, settings);
    let rounds = fight.rounds.len() as u32;

    let totals_for = |corner: Corner| -> Result<PunchTotals, StatsError> {
        Ok(PunchTotals::accumulate(fight.rounds.iter().map(|r| r.corner(corner)))?
            .unwrap_or_default())
    };
    let red_totals = totals_for(Corner::Red)?;
    let blue_totals = totals_for(Corner::Blue)?;

    let mut combined_totals = red_totals.clone();
    combined_totals.merge(&blue_totals)?;

    let boxer_summary = |corner: Corner, own: &PunchTotals, opponent: &PunchTotals| {
        let line = StatLine {
            totals: own.clone(),
            opponent: Some(opponent.clone()),
            minutes,
            rounds,
            ring_control: mean_ring_control(fight, corner),
        };
        BoxerSummary {
            corner,
            boxer: fight.boxer(corner).clone(),
            accuracy: line.accuracy(),
            work_rate: line.work_rate(),
            rounds_won: round_metrics
                .iter()
                .filter(|m| m.leader() == Some(corner))
                .count() as u32,
            line,
        }
    };

    let red = boxer_summary(Corner::Red, &red_totals, &blue_totals);
    let blue = boxer_summary(Corner::Blue, &blue_totals, &red_totals);
    let even_rounds = round_metrics.iter().filter(|m| m.leader().is_none()).count() as u32;

    log::debug!(
        "Summarized '{}': {} rounds, {:.1} min, red {}, blue {}",
        fight.id,
        rounds,
        minutes,
        red.line.totals.total,
        blue.line.totals.total
    );

    Ok(FightSummary {
        fight_id: fight.id.clone(),
        title: fight.display_name(),
        date: fight.date,
        result: fight.result,
        scheduled_rounds: fight.duration.scheduled_rounds,
        rounds_completed: fight.rounds_completed(),
        elapsed_minutes: minutes,
        round_minutes: round_minutes(fight, settings),
        red,
        blue,
        even_rounds,
        combined: StatLine {
            totals: combined_totals,
            opponent: None,
            minutes,
            rounds,
            ring_control: None,
        },
        trend: round_metrics.to_vec(),
    })
}

fn mean_ring_control(fight: &Fight, corner: Corner) -> Option<f64> {
    let values: Vec<f64> = fight
        .rounds
        .iter()
        .filter_map(|r| r.corner(corner).ring_control)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Aggregate rounds and summarize a fight in one step
pub fn summarize_fight(
    fight: &Fight,
    settings: &SummarySettings,
) -> Result<FightSummary, StatsError> {
    let round_metrics = aggregate_rounds(&fight.rounds)?;
    summarize(fight, &round_metrics, settings)
}

/// Summarize many fights in parallel.
///
/// Results keep the input order, so the output matches a sequential run.
pub fn summarize_all(
    fights: &[Fight],
    settings: &SummarySettings,
) -> Vec<Result<FightSummary, StatsError>> {
    log::info!("Summarizing {} fights in parallel...", fights.len());

    fights
        .par_iter()
        .map(|fight| summarize_fight(fight, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Boxer, FightDuration, PunchCount, PunchStats, Round};

    fn stats(landed: u32, thrown: u32) -> PunchStats {
        PunchStats::new(PunchCount::new(landed, thrown))
    }

    fn fight(rounds: Vec<Round>) -> Fight {
        Fight {
            id: "test-fight".to_string(),
            title: None,
            date: None,
            red: Boxer::new("red", "Red Boxer"),
            blue: Boxer::new("blue", "Blue Boxer"),
            duration: FightDuration {
                scheduled_rounds: 12,
                ..FightDuration::default()
            },
            result: None,
            rounds,
        }
    }

    #[test]
    fn test_overall_accuracy_is_not_mean_of_rounds() {
        let fight = fight(vec![
            Round::new(1, stats(5, 10), stats(1, 10)),
            Round::new(2, stats(80, 100), stats(10, 50)),
        ]);

        let summary = summarize_fight(&fight, &SummarySettings::default()).unwrap();
        let accuracy = summary.red.accuracy.unwrap();

        let mean_of_rounds = (0.5 + 0.8) / 2.0;
        assert!((accuracy - 85.0 / 110.0).abs() < 1e-12);
        assert!((accuracy - mean_of_rounds).abs() > 0.1);
        assert_eq!(summary.red.line.totals.total, PunchCount::new(85, 110));
    }

    #[test]
    fn test_work_rate_uses_three_minute_rounds() {
        let fight = fight(vec![
            Round::new(1, stats(10, 60), stats(10, 30)),
            Round::new(2, stats(10, 60), stats(10, 30)),
        ]);

        let summary = summarize_fight(&fight, &SummarySettings::default()).unwrap();
        assert_eq!(summary.elapsed_minutes, 6.0);
        assert_eq!(summary.red.work_rate, Some(20.0));
        assert_eq!(summary.blue.work_rate, Some(10.0));
        assert_eq!(summary.combined.work_rate(), Some(30.0));
    }

    #[test]
    fn test_duration_overrides() {
        let mut f = fight(vec![Round::new(1, stats(10, 60), stats(10, 30))]);
        f.duration.round_length = Some(Duration::from_secs(120));
        assert_eq!(elapsed_minutes(&f, &SummarySettings::default()), 2.0);

        f.duration.elapsed = Some(Duration::from_secs(90));
        let summary = summarize_fight(&f, &SummarySettings::default()).unwrap();
        assert_eq!(summary.elapsed_minutes, 1.5);
        assert_eq!(summary.red.work_rate, Some(40.0));

        f.duration.elapsed = None;
        f.duration.round_length = None;
        let settings = SummarySettings {
            round_length: Duration::from_secs(60),
        };
        assert_eq!(elapsed_minutes(&f, &settings), 1.0);
    }

    #[test]
    fn test_round_minutes_ignores_rounds_not_recorded() {
        let mut f = fight(vec![
            Round::new(1, stats(10, 30), stats(10, 30)),
            Round::new(2, stats(10, 30), stats(10, 30)),
        ]);
        f.duration.rounds_completed = Some(7);

        let summary = summarize_fight(&f, &SummarySettings::default()).unwrap();
        assert_eq!(summary.elapsed_minutes, 21.0);
        assert_eq!(summary.round_minutes, 3.0);

        f.duration.elapsed = Some(Duration::from_secs(7 * 120));
        assert_eq!(round_minutes(&f, &SummarySettings::default()), 2.0);
    }

    #[test]
    fn test_count_overflow_is_an_error() {
        let big = 3_000_000_000;
        let f = fight(vec![
            Round::new(1, stats(big, big), stats(1, 2)),
            Round::new(2, stats(big, big), stats(1, 2)),
        ]);
        assert!(matches!(
            summarize_fight(&f, &SummarySettings::default()),
            Err(StatsError::CountOverflow(_))
        ));

        // Each side fits, the combined line does not
        let f = fight(vec![Round::new(1, stats(big, big), stats(big, big))]);
        let metrics = aggregate_rounds(&f.rounds).unwrap();
        assert!(matches!(
            summarize(&f, &metrics, &SummarySettings::default()),
            Err(StatsError::CountOverflow(_))
        ));
    }

    #[test]
    fn test_zero_round_fight_is_incomplete() {
        let err = summarize_fight(&fight(Vec::new()), &SummarySettings::default()).unwrap_err();
        assert!(matches!(err, StatsError::DataIncomplete(_)));
    }

    #[test]
    fn test_mismatched_round_metrics_are_rejected() {
        let f = fight(vec![
            Round::new(1, stats(5, 10), stats(1, 10)),
            Round::new(2, stats(5, 10), stats(1, 10)),
        ]);
        let metrics = aggregate_rounds(&f.rounds[..1]).unwrap();
        assert!(matches!(
            summarize(&f, &metrics, &SummarySettings::default()),
            Err(StatsError::DataIncomplete(_))
        ));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let f = fight(vec![
            Round::new(1, stats(5, 10), stats(1, 10)),
            Round::new(2, stats(7, 30), stats(7, 12)),
        ]);
        let metrics = aggregate_rounds(&f.rounds).unwrap();
        let settings = SummarySettings::default();

        let first = summarize(&f, &metrics, &settings).unwrap();
        let second = summarize(&f, &metrics, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounds_won_and_ring_control() {
        let mut r1 = Round::new(1, stats(10, 20), stats(5, 20));
        r1.red.ring_control = Some(60.0);
        r1.blue.ring_control = Some(40.0);
        let mut r2 = Round::new(2, stats(5, 20), stats(5, 20));
        r2.red.ring_control = Some(50.0);
        r2.blue.ring_control = Some(50.0);
        let r3 = Round::new(3, stats(1, 20), stats(9, 20));

        let summary =
            summarize_fight(&fight(vec![r1, r2, r3]), &SummarySettings::default()).unwrap();
        assert_eq!(summary.red.rounds_won, 1);
        assert_eq!(summary.blue.rounds_won, 1);
        assert_eq!(summary.even_rounds, 1);
        assert_eq!(summary.red.line.ring_control, Some(55.0));
        assert_eq!(summary.blue.line.ring_control, Some(45.0));
        assert_eq!(summary.combined.ring_control, None);
    }

    #[test]
    fn test_partial_category_is_absent_from_totals() {
        let mut r1 = Round::new(1, stats(10, 20), stats(5, 20));
        r1.red.power = Some(PunchCount::new(6, 10));
        r1.blue.power = Some(PunchCount::new(2, 8));
        let mut r2 = Round::new(2, stats(10, 20), stats(5, 20));
        r2.blue.power = Some(PunchCount::new(3, 9));

        let summary =
            summarize_fight(&fight(vec![r1, r2]), &SummarySettings::default()).unwrap();
        assert_eq!(summary.red.line.totals.power, None);
        assert_eq!(summary.blue.line.totals.power, Some(PunchCount::new(5, 17)));
        assert_eq!(summary.combined.totals.power, None);
    }

    #[test]
    fn test_summarize_all_matches_sequential() {
        let fights: Vec<Fight> = (1..=8)
            .map(|n| {
                let mut f = fight(
                    (1..=n)
                        .map(|r| Round::new(r, stats(r, 10 + r), stats(n, 20)))
                        .collect(),
                );
                f.id = format!("fight-{}", n);
                f
            })
            .collect();
        let mut with_empty = fights.clone();
        with_empty.push(fight(Vec::new()));

        let settings = SummarySettings::default();
        let parallel = summarize_all(&with_empty, &settings);
        let sequential: Vec<_> = with_empty
            .iter()
            .map(|f| summarize_fight(f, &settings))
            .collect();

        assert_eq!(parallel, sequential);
        assert!(parallel.last().unwrap().is_err());
    }
}
