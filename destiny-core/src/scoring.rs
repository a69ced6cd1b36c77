//! Score calculation for a single player.
//!
//! Turns a player's allocation history, reserve and the events that hit them
//! into lifetime factor totals, the three indices, the Final Destiny composite
//! and an archetype. Holds no state between calls.

use crate::archetype::{classify, Archetype, ClassifyInput};
use crate::catalog::EventCatalog;
use crate::factor::{Factor, FactorValues};
use crate::records::{Allocation, EventOccurrence, Provenance, Reserve};
use serde::Serialize;

pub const BALANCE_WEIGHT: f64 = 0.4;
pub const IMPACT_WEIGHT: f64 = 0.3;
pub const EFFICIENCY_WEIGHT: f64 = 0.3;

/// Baseline points credited for each regular round played.
pub const ROUND_BASELINE: i64 = 100;
/// The pre-game reserve round; never counted as a played round.
pub const RESERVE_ROUND: u32 = 1;
/// Last round counted towards early reserve spending (age 40).
pub const SURVIVOR_ROUND_CUTOFF: u32 = 21;

/// Factors averaged into the Impact Index.
pub const IMPACT_FACTORS: [Factor; 3] = [Factor::Culture, Factor::Community, Factor::Environment];

/// Full result of scoring one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// All rounds plus all resolved event modifiers, per factor.
    pub lifetime: FactorValues,
    pub balance_index: f64,
    pub impact_index: f64,
    /// Percentage; not clamped.
    pub efficiency_index: f64,
    pub final_destiny: f64,
    pub rounds_played: u32,
    pub total_baseline_score: i64,
    pub event_score: i64,
    pub total_effective: i64,
    pub total_allocations: i64,
    pub reserves_total: i64,
    pub archetype: Archetype,
}

/// Scores players against a fixed event catalog.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCalculator<'a> {
    catalog: &'a EventCatalog,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(catalog: &'a EventCatalog) -> Self {
        Self { catalog }
    }

    /// Score one player.
    ///
    /// `events` should already be narrowed to the occurrences that affected
    /// this player. Occurrences whose id is not in the catalog are skipped.
    pub fn calculate(
        &self,
        allocations: &[Allocation],
        reserve: Option<&Reserve>,
        events: &[EventOccurrence],
    ) -> ScoreReport {
        let mut lifetime = FactorValues::new();
        let mut total_allocations = 0i64;
        let mut rounds_played = 0u32;
        let mut early_player_points = 0i64;

        for allocation in allocations {
            let points = allocation.values.sum();
            lifetime.merge(&allocation.values);
            total_allocations += points;

            if allocation.round > RESERVE_ROUND {
                rounds_played += 1;
            }
            if allocation.provenance == Provenance::Player
                && allocation.round <= SURVIVOR_ROUND_CUTOFF
            {
                early_player_points += points;
            }
        }

        let mut event_score = 0i64;
        for occurrence in events {
            let Some(effects) = self.catalog.effects(&occurrence.event_id) else {
                tracing::debug!(
                    event = %occurrence.event_id,
                    round = occurrence.round,
                    "ignoring event missing from catalog"
                );
                continue;
            };
            for effect in effects {
                lifetime.add(effect.factor, effect.modifier);
                event_score += effect.modifier;
            }
        }

        let reserves_total = reserve.map_or(0, |reserve| reserve.total);
        let total_baseline_score = ROUND_BASELINE * i64::from(rounds_played);
        let total_effective = total_baseline_score + event_score;

        let balance_index = balance_index(&lifetime);
        let impact_index = impact_index(&lifetime);
        let efficiency_index = efficiency_index(total_effective, total_allocations, reserves_total);
        let final_destiny = final_destiny(balance_index, impact_index, efficiency_index);

        let archetype = classify(&ClassifyInput {
            final_destiny,
            balance_index,
            impact_index,
            efficiency_index,
            finance_total: lifetime.finance,
            reserve_total: reserve.map(|reserve| reserve.total),
            allocation_count: allocations.len(),
            early_player_points,
        });

        tracing::debug!(
            rounds_played,
            balance_index,
            impact_index,
            efficiency_index,
            final_destiny,
            archetype = %archetype,
            "scored player"
        );

        ScoreReport {
            lifetime,
            balance_index,
            impact_index,
            efficiency_index,
            final_destiny,
            rounds_played,
            total_baseline_score,
            event_score,
            total_effective,
            total_allocations,
            reserves_total,
            archetype,
        }
    }
}

/// Round to two decimals, halves towards positive infinity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// `max(0, 100 - population stddev)` over the ten lifetime totals.
pub fn balance_index(lifetime: &FactorValues) -> f64 {
    let count = Factor::ALL.len() as f64;
    let mean = lifetime.sum() as f64 / count;
    let variance = lifetime
        .iter()
        .map(|(_, value)| (value as f64 - mean).powi(2))
        .sum::<f64>()
        / count;
    round2((100.0 - variance.sqrt()).max(0.0))
}

/// Average of the culture, community and environment totals.
pub fn impact_index(lifetime: &FactorValues) -> f64 {
    let total: i64 = IMPACT_FACTORS.iter().map(|factor| lifetime.get(*factor)).sum();
    round2(total as f64 / IMPACT_FACTORS.len() as f64)
}

/// Effective points as a percentage of everything allocated plus the reserve.
/// Zero when there is nothing to divide by.
pub fn efficiency_index(total_effective: i64, total_allocations: i64, reserves_total: i64) -> f64 {
    let denominator = total_allocations + reserves_total;
    if denominator == 0 {
        return 0.0;
    }
    round2(100.0 * total_effective as f64 / denominator as f64)
}

pub fn final_destiny(balance_index: f64, impact_index: f64, efficiency_index: f64) -> f64 {
    round2(
        BALANCE_WEIGHT * balance_index
            + IMPACT_WEIGHT * impact_index
            + EFFICIENCY_WEIGHT * efficiency_index,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Effect, EventCategory, EventDefinition};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn catalog() -> EventCatalog {
        EventCatalog::new(vec![
            EventDefinition {
                id: "BOOST_HEALTH".to_string(),
                category: EventCategory::SelfDevelopment,
                name: "boost".to_string(),
                description: String::new(),
                min_age: 19,
                max_age: 29,
                effects: vec![Effect {
                    factor: Factor::Health,
                    modifier: 10,
                }],
            },
            EventDefinition {
                id: "CRASH".to_string(),
                category: EventCategory::BadEvent,
                name: "crash".to_string(),
                description: String::new(),
                min_age: 40,
                max_age: 59,
                effects: vec![
                    Effect {
                        factor: Factor::Culture,
                        modifier: -30,
                    },
                    Effect {
                        factor: Factor::Finance,
                        modifier: -15,
                    },
                ],
            },
        ])
        .unwrap()
    }

    fn player_round(round: u32, values: FactorValues) -> Allocation {
        Allocation::new("p1", round, values, Provenance::Player)
    }

    #[test]
    fn round2_matches_half_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(97.0), 97.0);
    }

    #[test]
    fn empty_input_floor() {
        let catalog = catalog();
        let report = ScoreCalculator::new(&catalog).calculate(&[], None, &[]);
        assert_eq!(report.lifetime, FactorValues::new());
        assert_eq!(report.balance_index, 100.0);
        assert_eq!(report.impact_index, 0.0);
        assert_eq!(report.efficiency_index, 0.0);
        assert_eq!(report.final_destiny, 40.0);
        assert_eq!(report.archetype, Archetype::Balanced);
    }

    #[test]
    fn even_spread_gives_full_balance() {
        assert_eq!(balance_index(&FactorValues::uniform(50)), 100.0);
    }

    #[test]
    fn lopsided_spread_clamps_balance_at_zero() {
        let mut lifetime = FactorValues::new();
        lifetime.finance = 5000;
        assert_eq!(balance_index(&lifetime), 0.0);
    }

    #[test]
    fn impact_can_go_negative() {
        let mut lifetime = FactorValues::new();
        lifetime.culture = -30;
        lifetime.community = 5;
        lifetime.environment = 0;
        assert_eq!(impact_index(&lifetime), -8.33);
    }

    #[test]
    fn efficiency_guard_and_unclamped_range() {
        assert_eq!(efficiency_index(500, 0, 0), 0.0);
        assert_eq!(efficiency_index(-40, 0, 0), 0.0);
        assert_eq!(efficiency_index(300, 100, 0), 300.0);
        assert_eq!(efficiency_index(-50, 100, 0), -50.0);
        assert!(efficiency_index(1, 3, 0).is_finite());
    }

    #[test]
    fn events_feed_lifetime_and_event_score() {
        let catalog = catalog();
        let allocations = vec![player_round(2, FactorValues::uniform(10))];
        let events = vec![EventOccurrence::new(2, "CRASH")];
        let report = ScoreCalculator::new(&catalog).calculate(&allocations, None, &events);

        assert_eq!(report.lifetime.culture, -20);
        assert_eq!(report.lifetime.finance, -5);
        assert_eq!(report.event_score, -45);
        assert_eq!(report.total_effective, 55);
        assert_eq!(report.efficiency_index, 55.0);
    }

    #[test]
    fn unknown_event_changes_nothing() {
        let catalog = catalog();
        let calculator = ScoreCalculator::new(&catalog);
        let allocations = vec![player_round(2, FactorValues::uniform(10))];
        let known = vec![EventOccurrence::new(2, "BOOST_HEALTH")];
        let mut with_unknown = known.clone();
        with_unknown.push(EventOccurrence::new(3, "NOT_IN_CATALOG"));

        assert_eq!(
            calculator.calculate(&allocations, None, &known),
            calculator.calculate(&allocations, None, &with_unknown)
        );
    }

    #[test]
    fn reserve_round_counts_in_totals_but_not_rounds_played() {
        let catalog = catalog();
        let calculator = ScoreCalculator::new(&catalog);
        let reserve = Reserve::new("p1", FactorValues::uniform(100), 1000);
        let regular = vec![player_round(2, FactorValues::uniform(10))];
        let mut with_reserve_round = regular.clone();
        with_reserve_round.push(player_round(1, FactorValues::uniform(100)));

        let without = calculator.calculate(&regular, Some(&reserve), &[]);
        let with = calculator.calculate(&with_reserve_round, Some(&reserve), &[]);

        assert_eq!(without.rounds_played, 1);
        assert_eq!(with.rounds_played, 1);
        assert_eq!(with.total_baseline_score, without.total_baseline_score);
        assert_eq!(with.lifetime.health, 110);
        assert_eq!(without.lifetime.health, 10);
        assert_eq!(with.total_allocations, 1100);
    }

    #[test]
    fn survivor_counts_only_player_rounds_up_to_cutoff() {
        let catalog = catalog();
        let calculator = ScoreCalculator::new(&catalog);
        let reserve = Reserve::new("p1", FactorValues::uniform(100), 1000);

        let player_heavy = vec![player_round(1, FactorValues::uniform(100))];
        assert_eq!(
            calculator
                .calculate(&player_heavy, Some(&reserve), &[])
                .archetype,
            Archetype::Survivor
        );

        let system_heavy = vec![Allocation::new(
            "p1",
            1,
            FactorValues::uniform(100),
            Provenance::System,
        )];
        assert_eq!(
            calculator
                .calculate(&system_heavy, Some(&reserve), &[])
                .archetype,
            Archetype::Balanced
        );

        let late: Vec<_> = (22..31)
            .map(|round| player_round(round, FactorValues::uniform(10)))
            .collect();
        assert_ne!(
            calculator.calculate(&late, Some(&reserve), &[]).archetype,
            Archetype::Survivor
        );
    }

    #[test]
    fn shuffled_inputs_give_identical_reports() {
        let catalog = catalog();
        let calculator = ScoreCalculator::new(&catalog);
        let mut allocations: Vec<_> = (1..=12)
            .map(|round| {
                let mut values = FactorValues::uniform(round as i64);
                values.add(Factor::Career, 3 * round as i64);
                player_round(round, values)
            })
            .collect();
        let mut events = vec![
            EventOccurrence::new(2, "BOOST_HEALTH"),
            EventOccurrence::new(5, "CRASH"),
            EventOccurrence::new(7, "BOOST_HEALTH"),
            EventOccurrence::new(9, "MISSING"),
        ];
        let expected = calculator.calculate(&allocations, None, &events);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            allocations.shuffle(&mut rng);
            events.shuffle(&mut rng);
            assert_eq!(calculator.calculate(&allocations, None, &events), expected);
        }
    }
}
