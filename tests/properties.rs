use depth_engine::depth::{cumulative_depth, cumulative_widths};
use depth_engine::matching::resolve;
use depth_engine::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const LEVELS: usize = 15;

fn ladder_from(depths: &[(f64, f64)]) -> Ladder {
    let mut ladder = Ladder::flat(LEVELS, 0.5, 100.0);
    for (index, (visible, hidden)) in depths.iter().enumerate() {
        let offset = ladder.offset_of(index);
        let side = BookSide::for_offset(offset);
        let level = &mut ladder.levels_mut()[index];
        *level.visible_mut(side) = *visible;
        *level.hidden_mut(side) = *hidden;
    }
    ladder
}

fn depth_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0..60.0f64, 0.0..30.0f64), LEVELS)
}

proptest! {
    #[test]
    fn resolve_conserves_depth(
        depths in depth_strategy(),
        size in 0.0..400.0f64,
        target in 95.0..105.0f64,
        buy in any::<bool>(),
    ) {
        let mut ladder = ladder_from(&depths);
        let side = if buy { Side::Buy } else { Side::Sell };
        let book_side = BookSide::hit_by(side);
        let before = ladder.total_depth(book_side);
        let mut aggressor = Aggressor::new(1, side, size, target);

        let result = resolve(&mut aggressor, &mut ladder);

        let removed = before - ladder.total_depth(book_side);
        prop_assert!((removed - result.filled()).abs() < 1e-6);
        prop_assert!((result.consumed_visible + result.consumed_hidden - result.filled()).abs() < 1e-6);
        prop_assert!(result.remaining_size >= 0.0);
        prop_assert!(result.remaining_size <= size);
        prop_assert!(ladder.check_invariants().is_ok());
    }

    #[test]
    fn hidden_only_touched_after_visible_exhausted(
        depths in depth_strategy(),
        size in 0.0..400.0f64,
        target in 95.0..105.0f64,
        buy in any::<bool>(),
    ) {
        let mut ladder = ladder_from(&depths);
        let side = if buy { Side::Buy } else { Side::Sell };
        let book_side = BookSide::hit_by(side);
        let original = ladder.clone();
        let mut aggressor = Aggressor::new(1, side, size, target);
        resolve(&mut aggressor, &mut ladder);

        for (before, after) in original.levels().iter().zip(ladder.levels()) {
            if after.hidden(book_side) < before.hidden(book_side) {
                prop_assert_eq!(after.visible(book_side), 0.0);
            }
        }
    }

    #[test]
    fn cumulative_curves_are_non_decreasing(
        depths in depth_strategy(),
        count in 0usize..40,
        clamp in -5.0..100.0f64,
    ) {
        let ladder = ladder_from(&depths);
        for side in [BookSide::Bid, BookSide::Ask] {
            let curve = cumulative_depth(&ladder, side, count);
            prop_assert_eq!(curve.len(), count);
            prop_assert!(curve.windows(2).all(|w| w[1] >= w[0]));
            let widths = cumulative_widths(&ladder, side, count, clamp);
            prop_assert!(widths.windows(2).all(|w| w[1] >= w[0]));
            prop_assert!(widths.iter().all(|w| (0.0..=1.0).contains(w)));
        }
    }

    #[test]
    fn ticks_never_produce_negative_depth(
        seed in any::<u64>(),
        spawn_rate in 0.0..20.0f64,
        spoof_intensity in 0.0..3.0f64,
        replay_speed in 0.1..8.0f64,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = initialize(31, 0.5, 100.0, &SeedProfile::default(), &mut rng);
        let config = SimConfig { spawn_rate, spoof_intensity, replay_speed, ..SimConfig::default() };
        for _ in 0..200 {
            state = tick(state, 1.0 / 60.0, &config, &mut rng);
            prop_assert!(state.ladder.check_invariants().is_ok());
        }
    }
}
