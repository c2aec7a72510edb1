//! Landed-punch winner prediction.
//!
//! A rough verdict from the summary alone: whoever landed more significant
//! punches takes it. Sources without the significant category fall back to
//! total punches landed.

use crate::model::Corner;

use super::types::{FightSummary, Prediction, PredictionBasis};

/// Predict the winner of a fight from its summary
pub fn predict_winner(summary: &FightSummary) -> Prediction {
    let red = &summary.red.line.totals;
    let blue = &summary.blue.line.totals;

    let (basis, red_count, blue_count) = match (red.significant, blue.significant) {
        (Some(r), Some(b)) => (PredictionBasis::SignificantLanded, r, b),
        _ => (PredictionBasis::TotalLanded, red.total, blue.total),
    };

    let winner = match red_count.landed.cmp(&blue_count.landed) {
        std::cmp::Ordering::Greater => Some(Corner::Red),
        std::cmp::Ordering::Less => Some(Corner::Blue),
        std::cmp::Ordering::Equal => None,
    };

    Prediction {
        winner,
        basis,
        red_landed: red_count.landed,
        blue_landed: blue_count.landed,
        red_accuracy: red_count.accuracy(),
        blue_accuracy: blue_count.accuracy(),
    }
}

/// One-line explanation of a prediction
pub fn describe_prediction(summary: &FightSummary, prediction: &Prediction) -> String {
    let what = match prediction.basis {
        PredictionBasis::SignificantLanded => "significant punches",
        PredictionBasis::TotalLanded => "punches",
    };

    match prediction.winner {
        Some(corner) => {
            let p = prediction;
            let (own, other, accuracy) = match corner {
                Corner::Red => (p.red_landed, p.blue_landed, p.red_accuracy),
                Corner::Blue => (p.blue_landed, p.red_landed, p.blue_accuracy),
            };
            let accuracy = accuracy
                .map(|a| format!("{:.1}%", a * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            format!(
                "{} landed more {} ({} vs {}) at {} accuracy",
                summary.corner(corner).boxer.name,
                what,
                own,
                other,
                accuracy
            )
        }
        None => format!(
            "Too close to call: both landed {} {}",
            prediction.red_landed, what
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::{summarize_fight, SummarySettings};
    use crate::model::{Boxer, Fight, FightDuration, PunchCount, PunchStats, Round};

    fn summary(rounds: Vec<Round>) -> FightSummary {
        let fight = Fight {
            id: "verdict".to_string(),
            title: None,
            date: None,
            red: Boxer::new("lewis", "Lightning Lewis"),
            blue: Boxer::new("thompson", "Thunder Thompson"),
            duration: FightDuration {
                scheduled_rounds: 12,
                ..FightDuration::default()
            },
            result: None,
            rounds,
        };
        summarize_fight(&fight, &SummarySettings::default()).unwrap()
    }

    fn stats(total: (u32, u32), significant: Option<(u32, u32)>) -> PunchStats {
        let mut stats = PunchStats::new(PunchCount::new(total.0, total.1));
        stats.significant = significant.map(|(l, t)| PunchCount::new(l, t));
        stats
    }

    #[test]
    fn test_significant_landed_decides() {
        // Red lands more overall, blue more significant punches
        let s = summary(vec![Round::new(
            1,
            stats((30, 60), Some((10, 30))),
            stats((20, 60), Some((15, 30))),
        )]);

        let prediction = predict_winner(&s);
        assert_eq!(prediction.winner, Some(Corner::Blue));
        assert_eq!(prediction.basis, PredictionBasis::SignificantLanded);
        assert_eq!((prediction.red_landed, prediction.blue_landed), (10, 15));
        assert_eq!(prediction.blue_accuracy, Some(0.5));

        let text = describe_prediction(&s, &prediction);
        assert!(text.starts_with("Thunder Thompson landed more significant punches (15 vs 10)"));
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_falls_back_to_total_landed() {
        let s = summary(vec![Round::new(
            1,
            stats((30, 60), Some((10, 30))),
            stats((20, 60), None),
        )]);

        let prediction = predict_winner(&s);
        assert_eq!(prediction.basis, PredictionBasis::TotalLanded);
        assert_eq!(prediction.winner, Some(Corner::Red));
    }

    #[test]
    fn test_equal_landed_is_too_close() {
        let s = summary(vec![Round::new(1, stats((20, 60), None), stats((20, 40), None))]);

        let prediction = predict_winner(&s);
        assert_eq!(prediction.winner, None);
        assert_eq!(
            describe_prediction(&s, &prediction),
            "Too close to call: both landed 20 punches"
        );
    }
}
