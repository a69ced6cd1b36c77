use destiny_core::{
    Allocation, EventCatalog, EventOccurrence, Factor, FactorValues, Provenance, Reserve,
    ScoreCalculator,
};
use proptest::prelude::*;

const EVENT_IDS: &[&str] = &[
    "Y20_BAD_FIRE",
    "Y30_OP_NETWORK",
    "Y40_BAD_DIVORCE",
    "Y60_OP_EARTH",
    "NOT_A_REAL_EVENT",
];

fn values_strategy() -> impl Strategy<Value = FactorValues> {
    prop::collection::vec(0i64..=120, 10).prop_map(|points| {
        let mut values = FactorValues::new();
        for (factor, amount) in Factor::ALL.iter().zip(points) {
            *values.get_mut(*factor) = amount;
        }
        values
    })
}

fn allocation_strategy() -> impl Strategy<Value = Allocation> {
    (1u32..=40, values_strategy(), any::<bool>()).prop_map(|(round, values, by_player)| {
        let provenance = if by_player {
            Provenance::Player
        } else {
            Provenance::System
        };
        Allocation::new("p1", round, values, provenance)
    })
}

fn event_strategy() -> impl Strategy<Value = EventOccurrence> {
    (1u32..=40, prop::sample::select(EVENT_IDS))
        .prop_map(|(round, id)| EventOccurrence::new(round, id))
}

fn reserve_strategy() -> impl Strategy<Value = Option<Reserve>> {
    prop::option::of((0i64..=1500).prop_map(|total| {
        Reserve::new("p1", FactorValues::new(), total)
    }))
}

proptest! {
    #[test]
    fn repeated_calls_are_identical(
        allocations in prop::collection::vec(allocation_strategy(), 0..30),
        events in prop::collection::vec(event_strategy(), 0..10),
        reserve in reserve_strategy(),
    ) {
        let catalog = EventCatalog::builtin();
        let calculator = ScoreCalculator::new(&catalog);
        let first = calculator.calculate(&allocations, reserve.as_ref(), &events);
        let second = calculator.calculate(&allocations, reserve.as_ref(), &events);
        prop_assert_eq!(first.final_destiny.to_bits(), second.final_destiny.to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_matter(
        (allocations, shuffled_allocations) in prop::collection::vec(allocation_strategy(), 0..30)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        (events, shuffled_events) in prop::collection::vec(event_strategy(), 0..10)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        reserve in reserve_strategy(),
    ) {
        let catalog = EventCatalog::builtin();
        let calculator = ScoreCalculator::new(&catalog);
        prop_assert_eq!(
            calculator.calculate(&allocations, reserve.as_ref(), &events),
            calculator.calculate(&shuffled_allocations, reserve.as_ref(), &shuffled_events)
        );
    }

    #[test]
    fn indices_are_always_finite(
        allocations in prop::collection::vec(allocation_strategy(), 0..30),
        events in prop::collection::vec(event_strategy(), 0..10),
        reserve in reserve_strategy(),
    ) {
        let catalog = EventCatalog::builtin();
        let report = ScoreCalculator::new(&catalog).calculate(&allocations, reserve.as_ref(), &events);
        prop_assert!(report.balance_index.is_finite());
        prop_assert!(report.balance_index >= 0.0 && report.balance_index <= 100.0);
        prop_assert!(report.impact_index.is_finite());
        prop_assert!(report.efficiency_index.is_finite());
        prop_assert!(report.final_destiny.is_finite());
    }

    #[test]
    fn unknown_events_are_ignored(
        allocations in prop::collection::vec(allocation_strategy(), 0..20),
        reserve in reserve_strategy(),
        extra_rounds in prop::collection::vec(1u32..=40, 1..5),
    ) {
        let catalog = EventCatalog::builtin();
        let calculator = ScoreCalculator::new(&catalog);
        let unknown: Vec<_> = extra_rounds
            .into_iter()
            .map(|round| EventOccurrence::new(round, "NOT_A_REAL_EVENT"))
            .collect();
        prop_assert_eq!(
            calculator.calculate(&allocations, reserve.as_ref(), &[]),
            calculator.calculate(&allocations, reserve.as_ref(), &unknown)
        );
    }
}
