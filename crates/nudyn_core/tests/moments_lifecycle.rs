//! Lifecycle tests for the moments accumulator.
//!
//! # Test Categories
//!
//! 1. **Round Trip**: accumulate, finalise, reset, re-accumulate reproduces the summary
//! 2. **Merge Law**: split-and-merge equals one sequential pass
//! 3. **Insufficient Data**: finalisation below two events is recoverable

use approx::assert_relative_eq;
use nudyn_core::moments::{AccumulatorState, MomentsAccumulator, MomentsSummary};
use nudyn_core::types::{KaonEvent, MomentsError, RatioField, SpeciesCounts};
use proptest::prelude::*;

/// Five hand-made events mixing both categories.
fn synthetic_events() -> Vec<KaonEvent> {
    vec![
        KaonEvent::new(12.0, SpeciesCounts::new(2, 1, 3), SpeciesCounts::default()),
        KaonEvent::new(48.5, SpeciesCounts::new(5, 3, 4), SpeciesCounts::new(6, 2, 1)),
        KaonEvent::new(3.2, SpeciesCounts::default(), SpeciesCounts::default()),
        KaonEvent::new(150.0, SpeciesCounts::new(20, 9, 22), SpeciesCounts::new(0, 0, 9)),
        KaonEvent::new(77.7, SpeciesCounts::new(7, 4, 8), SpeciesCounts::new(3, 3, 2)),
    ]
}

fn accumulate(events: &[KaonEvent]) -> MomentsAccumulator {
    let mut moments = MomentsAccumulator::new();
    for event in events {
        moments.add(event);
    }
    moments
}

fn assert_summaries_close(a: &MomentsSummary, b: &MomentsSummary) {
    assert_eq!(a.n_events(), b.n_events());
    assert_relative_eq!(a.total.k.average, b.total.k.average, max_relative = 1e-12);
    assert_relative_eq!(
        a.dcc.k0.factorial_average,
        b.dcc.k0.factorial_average,
        max_relative = 1e-12
    );
    for field in RatioField::ALL {
        match (a.ratio(field), b.ratio(field)) {
            (Ok(x), Ok(y)) => assert_relative_eq!(x, y, epsilon = 1e-12, max_relative = 1e-12),
            (x, y) => assert_eq!(x, y, "{field} differs"),
        }
    }
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_reset_and_reaccumulate_reproduces_summary() {
    let events = synthetic_events();
    let mut moments = accumulate(&events);
    let first = moments.finalize().unwrap().clone();

    moments.reset();
    assert_eq!(moments.state(), AccumulatorState::Empty);
    for event in &events {
        moments.add(event);
    }
    let second = moments.finalize().unwrap();

    assert_eq!(&first, second);
}

#[test]
fn test_synthetic_averages() {
    let mut moments = accumulate(&synthetic_events());
    let summary = moments.finalize().unwrap();

    // Σk = 5 + 16 + 0 + 51 + 20 = 92
    assert_relative_eq!(summary.total.k.average, 92.0 / 5.0);
    // Σk_DCC = 0 + 7 + 0 + 9 + 5 = 21
    assert_relative_eq!(summary.dcc.k.average, 21.0 / 5.0);
    assert_relative_eq!(
        summary.total.k.average,
        summary.binomial.k.average + summary.dcc.k.average,
        max_relative = 1e-12
    );
    assert!(summary.undefined_fields().is_empty());
}

// ============================================================================
// Merge Law
// ============================================================================

#[test]
fn test_merge_matches_sequential_for_every_split() {
    let events = synthetic_events();
    let mut sequential = accumulate(&events);
    let expected = sequential.finalize().unwrap().clone();

    for split in 0..=events.len() {
        let (head, tail) = events.split_at(split);
        let mut merged = accumulate(head).merged(accumulate(tail));
        assert_eq!(merged.sums(), sequential.sums());
        assert_summaries_close(merged.finalize().unwrap(), &expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property test: merging is exact for any split of any event list.
    #[test]
    fn prop_merge_law(
        counts in prop::collection::vec((0u64..60, 0u64..60, 0u64..60, 0u64..60), 2..40),
        split_seed in any::<usize>(),
    ) {
        let events: Vec<KaonEvent> = counts
            .iter()
            .map(|&(b0, bc, d0, dc)| {
                KaonEvent::new(
                    1.0,
                    SpeciesCounts::new(b0, b0 / 2, bc),
                    SpeciesCounts::new(d0, d0 / 3, dc),
                )
            })
            .collect();
        let split = split_seed % (events.len() + 1);
        let (head, tail) = events.split_at(split);

        let sequential = accumulate(&events);
        let mut reversed = accumulate(tail);
        reversed.merge(&accumulate(head));

        prop_assert_eq!(sequential.sums(), reversed.sums());
    }
}

// ============================================================================
// Insufficient Data
// ============================================================================

#[test]
fn test_finalize_requires_two_events() {
    let events = synthetic_events();
    let mut moments = MomentsAccumulator::new();
    assert_eq!(
        moments.finalize(),
        Err(MomentsError::InsufficientData { n_events: 0 })
    );

    moments.add(&events[0]);
    assert_eq!(
        moments.finalize(),
        Err(MomentsError::InsufficientData { n_events: 1 })
    );

    moments.add(&events[1]);
    assert!(moments.finalize().is_ok());
}
