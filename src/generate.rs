//! Sample fight generation.
//!
//! Produces plausible round-by-round punch statistics for demos and tests.
//! Every generated round satisfies the record invariants: landed never
//! exceeds thrown in any category, jabs and power punches add up to the
//! total, and the two ring control shares sum to 100.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{Boxer, Fight, FightDuration, PunchCount, PunchStats, Round};

/// Boxer with an id derived from the name ("Lightning Lewis" -> "lightning-lewis")
pub fn boxer_from_name(name: &str) -> Boxer {
    let id = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    Boxer::new(id, name)
}

fn scaled(value: u32, factor: f64) -> u32 {
    (value as f64 * factor) as u32
}

fn generate_stats<R: Rng + ?Sized>(rng: &mut R) -> PunchStats {
    let thrown = rng.gen_range(40..=80);
    let landed = rng.gen_range(scaled(thrown, 0.2)..=scaled(thrown, 0.5));

    let significant_thrown = rng.gen_range(scaled(thrown, 0.4)..=scaled(thrown, 0.7));
    let significant_landed = rng
        .gen_range(scaled(landed, 0.5)..=landed)
        .min(significant_thrown)
        .max(scaled(significant_thrown, 0.1));

    let head_landed =
        rng.gen_range(scaled(significant_landed, 0.4)..=scaled(significant_landed, 0.8));

    let significant = PunchCount::new(significant_landed, significant_thrown);
    PunchStats {
        total: PunchCount::new(landed, thrown),
        jabs: Some(PunchCount::new(
            landed - significant_landed,
            thrown - significant_thrown,
        )),
        power: Some(significant),
        significant: Some(significant),
        head_landed: Some(head_landed),
        body_landed: Some(significant_landed - head_landed),
        ring_control: None,
    }
}

/// Generate a complete fight of `rounds` rounds
pub fn generate_fight<R: Rng + ?Sized>(rng: &mut R, red: Boxer, blue: Boxer, rounds: u32) -> Fight {
    let rounds: Vec<Round> = (1..=rounds)
        .map(|number| {
            let mut red_stats = generate_stats(rng);
            let mut blue_stats = generate_stats(rng);

            let control = (rng.gen_range(30.0..70.0_f64) * 10.0).round() / 10.0;
            red_stats.ring_control = Some(control);
            blue_stats.ring_control = Some(((100.0 - control) * 10.0).round() / 10.0);

            Round::new(number, red_stats, blue_stats)
        })
        .collect();

    log::debug!("Generated {} rounds for {} vs {}", rounds.len(), red.name, blue.name);

    Fight {
        id: format!("{}-vs-{}", red.id, blue.id),
        title: Some(format!("{} vs {}", red.name, blue.name)),
        date: None,
        duration: FightDuration {
            scheduled_rounds: rounds.len() as u32,
            ..FightDuration::default()
        },
        red,
        blue,
        result: None,
        rounds,
    }
}

/// Reproducible fight from a seed
pub fn generate_seeded(seed: u64, red: Boxer, blue: Boxer, rounds: u32) -> Fight {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_fight(&mut rng, red, blue, rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::{summarize_fight, SummarySettings};
    use crate::loader::validate_fight;

    fn pair() -> (Boxer, Boxer) {
        (
            boxer_from_name("Lightning Lewis"),
            boxer_from_name("Thunder Thompson"),
        )
    }

    #[test]
    fn test_boxer_from_name() {
        let boxer = boxer_from_name("  Canelo  Álvarez ");
        assert_eq!(boxer.id, "canelo-álvarez");
        assert_eq!(boxer.name, "  Canelo  Álvarez ");
        assert_eq!(boxer_from_name("Lightning Lewis").id, "lightning-lewis");
    }

    #[test]
    fn test_generated_rounds_are_consistent() {
        for seed in 0..200 {
            let (red, blue) = pair();
            let fight = generate_seeded(seed, red, blue, 12);

            assert_eq!(fight.rounds.len(), 12);
            assert_eq!(fight.id, "lightning-lewis-vs-thunder-thompson");
            for round in &fight.rounds {
                for stats in [&round.red, &round.blue] {
                    assert_eq!(stats.first_violation(), None, "seed {}", seed);
                    assert!((40..=80).contains(&stats.total.thrown));

                    let jabs = stats.jabs.unwrap();
                    let power = stats.power.unwrap();
                    assert_eq!(jabs.checked_add(power), Some(stats.total));
                    assert_eq!(
                        stats.head_landed.unwrap() + stats.body_landed.unwrap(),
                        stats.significant.unwrap().landed
                    );
                }
                let control = round.red.ring_control.unwrap() + round.blue.ring_control.unwrap();
                assert!((control - 100.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_generated_fights_summarize() {
        for seed in 0..50 {
            let (red, blue) = pair();
            let fight = generate_seeded(seed, red, blue, 10);

            assert!(validate_fight(&fight).is_ok());
            let summary = summarize_fight(&fight, &SummarySettings::default()).unwrap();
            assert_eq!(summary.rounds_completed, 10);
            assert!(summary.red.accuracy.is_some());
        }
    }

    #[test]
    fn test_same_seed_same_fight() {
        let (red, blue) = pair();
        let a = generate_seeded(42, red.clone(), blue.clone(), 6);
        let b = generate_seeded(42, red, blue, 6);
        assert_eq!(a, b);
    }
}
