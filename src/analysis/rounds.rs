//! Round aggregation.
//!
//! Turns raw round counts into per-boxer round metrics: accuracy, landed
//! differential and running totals across the fight.

use crate::error::StatsError;
use crate::model::{ratio, Corner, PunchCategory, PunchCount, PunchStats, Round};

use super::types::{CornerRoundMetrics, Cumulative, RoundMetrics};

/// Check landed <= thrown for every category of both corners.
///
/// Values are never clamped: a violating round is rejected as a whole.
pub fn validate_round(round: &Round) -> Result<(), StatsError> {
    for corner in Corner::BOTH {
        if let Some((category, count)) = round.corner(corner).first_violation() {
            return Err(StatsError::InvariantViolation {
                round: round.number,
                corner,
                category,
                landed: count.landed,
                thrown: count.thrown,
            });
        }
    }
    Ok(())
}

/// Compute the metrics of both boxers for a single round.
///
/// The cumulative block only covers this round; `aggregate_rounds` fills in
/// running totals across a fight.
pub fn compute_round_metrics(round: &Round) -> Result<RoundMetrics, StatsError> {
    validate_round(round)?;

    let red_landed = round.red.total.landed as i64;
    let blue_landed = round.blue.total.landed as i64;

    Ok(RoundMetrics {
        round: round.number,
        red: corner_metrics(&round.red, red_landed - blue_landed),
        blue: corner_metrics(&round.blue, blue_landed - red_landed),
    })
}

fn corner_metrics(stats: &PunchStats, landed_differential: i64) -> CornerRoundMetrics {
    let category_accuracy =
        |category: PunchCategory| stats.category(category).and_then(|count| count.accuracy());

    CornerRoundMetrics {
        stats: stats.clone(),
        accuracy: stats.total.accuracy(),
        jab_accuracy: category_accuracy(PunchCategory::Jab),
        power_accuracy: category_accuracy(PunchCategory::Power),
        significant_accuracy: category_accuracy(PunchCategory::Significant),
        landed_differential,
        cumulative: Cumulative {
            landed: stats.total.landed,
            thrown: stats.total.thrown,
            accuracy: stats.total.accuracy(),
            landed_differential,
        },
    }
}

/// Compute metrics for every round in order, with running totals.
///
/// Fails on the first round that violates landed <= thrown.
pub fn aggregate_rounds(rounds: &[Round]) -> Result<Vec<RoundMetrics>, StatsError> {
    let mut running = [Cumulative::default(); 2];

    rounds
        .iter()
        .map(|round| {
            let mut metrics = compute_round_metrics(round)?;
            for (slot, corner) in running.iter_mut().zip(Corner::BOTH) {
                let current = metrics.corner_mut(corner);
                let total = PunchCount::new(slot.landed, slot.thrown)
                    .checked_add(current.stats.total)
                    .ok_or_else(|| {
                        StatsError::CountOverflow(format!(
                            "{} corner running total after round {}",
                            corner, round.number
                        ))
                    })?;
                slot.landed = total.landed;
                slot.thrown = total.thrown;
                slot.landed_differential += current.landed_differential;
                slot.accuracy = ratio(slot.landed as f64, slot.thrown as f64);
                current.cumulative = *slot;
            }
            Ok(metrics)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(number: u32, red: (u32, u32), blue: (u32, u32)) -> Round {
        Round::new(
            number,
            PunchStats::new(PunchCount::new(red.0, red.1)),
            PunchStats::new(PunchCount::new(blue.0, blue.1)),
        )
    }

    #[test]
    fn test_round_accuracy_and_differential() {
        let metrics = compute_round_metrics(&round(1, (12, 40), (8, 50))).unwrap();

        assert_eq!(metrics.round, 1);
        assert_eq!(metrics.red.accuracy, Some(0.3));
        assert_eq!(metrics.blue.accuracy, Some(0.16));
        assert_eq!(metrics.red.landed_differential, 4);
        assert_eq!(metrics.blue.landed_differential, -4);
        assert_eq!(metrics.leader(), Some(Corner::Red));
    }

    #[test]
    fn test_zero_thrown_is_undefined_not_zero() {
        let metrics = compute_round_metrics(&round(3, (0, 0), (0, 25))).unwrap();

        assert_eq!(metrics.red.accuracy, None);
        assert_eq!(metrics.blue.accuracy, Some(0.0));
        assert_eq!(metrics.leader(), None);
    }

    #[test]
    fn test_accuracy_stays_within_unit_interval() {
        for thrown in 1..40u32 {
            for landed in 0..=thrown {
                let metrics =
                    compute_round_metrics(&round(1, (landed, thrown), (0, thrown))).unwrap();
                let accuracy = metrics.red.accuracy.unwrap();
                assert!((0.0..=1.0).contains(&accuracy));
            }
        }
    }

    #[test]
    fn test_landed_over_thrown_is_rejected() {
        let err = compute_round_metrics(&round(4, (10, 20), (21, 20))).unwrap_err();
        assert_eq!(
            err,
            StatsError::InvariantViolation {
                round: 4,
                corner: Corner::Blue,
                category: PunchCategory::Total,
                landed: 21,
                thrown: 20,
            }
        );
    }

    #[test]
    fn test_category_violation_is_rejected() {
        let mut bad = round(2, (10, 20), (5, 20));
        bad.red.jabs = Some(PunchCount::new(6, 5));

        let err = compute_round_metrics(&bad).unwrap_err();
        assert!(matches!(
            err,
            StatsError::InvariantViolation {
                category: PunchCategory::Jab,
                corner: Corner::Red,
                ..
            }
        ));
    }

    #[test]
    fn test_category_accuracies() {
        let mut r = round(1, (20, 60), (10, 40));
        r.red.jabs = Some(PunchCount::new(5, 30));
        r.red.power = Some(PunchCount::new(15, 30));

        let metrics = compute_round_metrics(&r).unwrap();
        assert_eq!(metrics.red.jab_accuracy, Some(5.0 / 30.0));
        assert_eq!(metrics.red.power_accuracy, Some(0.5));
        assert_eq!(metrics.red.significant_accuracy, None);
        assert_eq!(metrics.blue.jab_accuracy, None);
    }

    #[test]
    fn test_aggregate_rounds_cumulative() {
        let rounds = vec![
            round(1, (5, 10), (3, 12)),
            round(2, (80, 100), (20, 60)),
            round(3, (0, 0), (10, 20)),
        ];

        let metrics = aggregate_rounds(&rounds).unwrap();
        assert_eq!(metrics.len(), 3);

        let red = &metrics[1].red.cumulative;
        assert_eq!((red.landed, red.thrown), (85, 110));
        assert_eq!(red.accuracy, Some(85.0 / 110.0));
        assert_eq!(red.landed_differential, 2 + 60);

        let last = &metrics[2];
        assert_eq!(last.red.accuracy, None);
        assert_eq!(last.red.cumulative.accuracy, Some(85.0 / 110.0));
        assert_eq!(last.blue.cumulative.landed, 33);
        assert_eq!(last.blue.cumulative.landed_differential, -52);
    }

    #[test]
    fn test_aggregate_rounds_stops_at_violation() {
        let rounds = vec![round(1, (5, 10), (3, 12)), round(2, (11, 10), (3, 12))];
        assert!(matches!(
            aggregate_rounds(&rounds),
            Err(StatsError::InvariantViolation { round: 2, .. })
        ));
        assert_eq!(aggregate_rounds(&[]).unwrap(), Vec::new());
    }

    #[test]
    fn test_running_total_overflow_is_an_error() {
        let big = 3_000_000_000;
        let rounds = vec![round(1, (big, big), (1, 2)), round(2, (big, big), (1, 2))];

        assert_eq!(
            aggregate_rounds(&rounds),
            Err(StatsError::CountOverflow(
                "red corner running total after round 2".to_string()
            ))
        );
    }
}
