#[cfg(test)]
mod tests {
    use depth_engine::evolution::{evolve, SPOOF_EPSILON};
    use depth_engine::matching::resolve;
    use depth_engine::depth::cumulative_depth;
    use depth_engine::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet() -> SimConfig {
        SimConfig {
            walk_intensity: 0.0,
            spoof_intensity: 0.0,
            spawn_rate: 0.0,
            travel_speed: 100.0,
            ..SimConfig::default()
        }
    }

    /// 7 levels around 100.0, asks at offsets 1..=3 nearest to farthest.
    fn three_ask_ladder(asks: [f64; 3]) -> Ladder {
        let mut ladder = Ladder::flat(7, 1.0, 100.0);
        for (k, depth) in asks.iter().enumerate() {
            ladder.level_mut(k as i32 + 1).unwrap().ask_visible = *depth;
        }
        ladder
    }

    // ========== Book Walk Scenarios ==========

    #[test]
    fn test_buy_aggressor_fully_filled() {
        let mut state = SimulationState::from_ladder(three_ask_ladder([10.0, 5.0, 0.0]));
        state.submit(Side::Buy, 12.0, 101.0);
        let mut rng = FixedSequence::constant(0.5);
        let state = tick(state, 0.1, &quiet(), &mut rng);

        assert_eq!(state.ladder.visible_at(1, BookSide::Ask), 0.0);
        assert_eq!(state.ladder.visible_at(2, BookSide::Ask), 3.0);
        let fill = &state.last_fills()[0];
        assert_eq!(fill.remaining_size, 0.0);
        assert!(!fill.is_partial());
        assert_eq!(state.flow.cumulative_signed_volume(), 12.0);
    }

    #[test]
    fn test_buy_aggressor_breaks_through_book() {
        let mut state = SimulationState::from_ladder(three_ask_ladder([10.0, 5.0, 0.0]));
        state.submit(Side::Buy, 20.0, 101.0);
        let mut rng = FixedSequence::constant(0.5);
        let state = tick(state, 0.1, &quiet(), &mut rng);

        let fill = &state.last_fills()[0];
        assert!(fill.is_partial());
        assert_eq!(fill.remaining_size, 5.0);
        assert_eq!(state.flow.cumulative_signed_volume(), 15.0);
        assert_eq!(state.flow.overflow_count(), 1);
        assert!(state.in_flight().is_empty(), "partially filled aggressor must retire");
    }

    #[test]
    fn test_sell_aggressor_reaches_iceberg() {
        let mut ladder = Ladder::flat(7, 1.0, 100.0);
        {
            let level = ladder.level_mut(0).unwrap();
            level.bid_visible = 2.0;
            level.bid_hidden = 8.0;
        }
        let mut aggressor = Aggressor::new(1, Side::Sell, 5.0, 100.0);
        let result = resolve(&mut aggressor, &mut ladder);

        let level = ladder.level(0).unwrap();
        assert_eq!(level.bid_visible, 0.0);
        assert_eq!(level.bid_hidden, 5.0);
        assert_eq!(result.consumed_visible, 2.0);
        assert_eq!(result.consumed_hidden, 3.0);
    }

    // ========== Spoof Lifecycle ==========

    #[test]
    fn test_spoof_wall_flashes_and_evaporates() {
        let config = SimConfig {
            walk_intensity: 0.0,
            spoof_intensity: 1.0,
            spoof_distance: 0,
            max_volume_clamp: 50.0,
            ..SimConfig::default()
        };
        let mut ladder = Ladder::flat(5, 1.0, 100.0);
        // mid level: walk draw, activation draw (fires), bump draw 0.6 -> 0.76 * 50 = 38
        let mut rng = FixedSequence::new(vec![0.5, 0.5, 0.5, 0.0, 0.6]);
        evolve(&mut ladder, 0.1, &config, &mut rng);
        {
            let mid = ladder.level(0).unwrap();
            assert!(mid.spoof_active);
            assert_eq!(mid.spoof_alpha, 1.0);
            assert!((mid.bid_visible - 38.0).abs() < 1e-9);
        }

        let fade = SimConfig { spoof_intensity: 0.0, ..config };
        let mut rng = FixedSequence::constant(0.5);
        let mut previous = 1.0;
        for _ in 0..10_000 {
            evolve(&mut ladder, 0.1, &fade, &mut rng);
            let mid = ladder.level(0).unwrap();
            if !mid.spoof_active {
                assert_eq!(mid.spoof_alpha, 0.0);
                assert!(previous >= SPOOF_EPSILON);
                return;
            }
            assert!(mid.spoof_alpha < previous);
            previous = mid.spoof_alpha;
        }
        panic!("spoof wall never deactivated");
    }

    #[test]
    fn test_spoofs_terminate_once_injection_stops() {
        let mut sim = DepthSimulation::with_profile(61, 0.5, 100.0, 17, SeedProfile::default());
        sim.update_config(|c| c.spoof_intensity = 5.0);
        for _ in 0..120 {
            sim.tick_core(1.0 / 30.0);
        }
        assert!(sim.stats_core().active_spoofs > 0);

        sim.update_config(|c| c.spoof_intensity = 0.0);
        for _ in 0..600 {
            sim.tick_core(1.0 / 30.0);
        }
        assert_eq!(sim.stats_core().active_spoofs, 0);
    }

    // ========== Cumulative Depth ==========

    #[test]
    fn test_cumulative_bid_curve() {
        let mut ladder = Ladder::flat(9, 1.0, 100.0);
        for (k, depth) in [4.0, 6.0, 0.0, 3.0].iter().enumerate() {
            ladder.level_mut(-(k as i32)).unwrap().bid_visible = *depth;
        }
        assert_eq!(cumulative_depth(&ladder, BookSide::Bid, 4), vec![4.0, 10.0, 10.0, 13.0]);
    }

    // ========== Long-Run Invariants ==========

    #[test]
    fn test_long_run_invariants_hold() {
        let mut sim = DepthSimulation::with_profile(81, 0.25, 100.0, 2024, SeedProfile::default());
        sim.update_config(|c| {
            c.spawn_rate = 4.0;
            c.spoof_intensity = 0.3;
        });
        for i in 0..3_000 {
            let snap = sim.tick_core(1.0 / 60.0);
            if let Err(violation) = sim.state().ladder.check_invariants() {
                panic!("tick {}: {}", i, violation);
            }
            for curve in [&snap.cumulative_bid, &snap.cumulative_ask] {
                assert!(curve.windows(2).all(|w| w[1] >= w[0]));
            }
            for fill in &snap.fills {
                let sum = fill.consumed_visible + fill.consumed_hidden;
                assert!((sum - fill.filled()).abs() < 1e-9);
            }
        }
        let stats = sim.stats_core();
        assert!(stats.spawn_count > 0);
        assert!(stats.fill_count > 0);
    }

    #[test]
    fn test_flow_matches_sum_of_fills() {
        let mut sim = DepthSimulation::with_profile(41, 0.5, 100.0, 8, SeedProfile::default());
        sim.update_config(|c| c.spawn_rate = 6.0);
        let mut expected = 0.0;
        for _ in 0..1_000 {
            let snap = sim.tick_core(1.0 / 30.0);
            expected += snap.fills.iter().map(|f| f.signed_volume()).sum::<f64>();
        }
        let actual = sim.snapshot_core().cumulative_signed_volume;
        assert!((actual - expected).abs() < 1e-6);
    }

    #[test]
    fn test_ladder_shape_is_constant() {
        let mut sim = DepthSimulation::with_profile(33, 0.1, 50.0, 4, SeedProfile::default());
        let before = sim.snapshot_core();
        sim.run_batch(500, 1.0 / 60.0);
        let after = sim.snapshot_core();
        assert_eq!(before.levels.len(), after.levels.len());
        assert_eq!(before.tick_size, after.tick_size);
        for (a, b) in before.levels.iter().zip(after.levels.iter()) {
            assert_eq!(a.price, b.price);
        }
    }

    // ========== Host Surface ==========

    #[test]
    fn test_snapshot_is_idempotent_between_ticks() {
        let mut sim = DepthSimulation::with_profile(41, 0.5, 100.0, 9, SeedProfile::default());
        sim.run_batch(200, 1.0 / 60.0);
        let a = sim.snapshot_core();
        let b = sim.snapshot_core();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = DepthSimulation::with_profile(41, 0.5, 100.0, 77, SeedProfile::default());
        let mut b = DepthSimulation::with_profile(41, 0.5, 100.0, 77, SeedProfile::default());
        for _ in 0..300 {
            assert_eq!(a.tick_core(1.0 / 60.0), b.tick_core(1.0 / 60.0));
        }
    }

    #[test]
    fn test_pure_tick_matches_host_handle() {
        let profile = SeedProfile::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = initialize(41, 0.5, 100.0, &profile, &mut rng);
        let mut sim = DepthSimulation::with_profile(41, 0.5, 100.0, 5, profile);
        let config = SimConfig::default();
        for _ in 0..100 {
            state = tick(state, 1.0 / 60.0, &config, &mut rng);
            sim.tick_core(1.0 / 60.0);
        }
        assert_eq!(snapshot(&state), sim.snapshot_core());
    }

    #[test]
    fn test_inject_aggressor_and_reset_flow() {
        let mut sim = DepthSimulation::with_profile(41, 0.5, 100.0, 3, SeedProfile::default());
        sim.apply_config(quiet());
        sim.inject_aggressor(false, 10.0, 100.0);
        let snap = sim.tick_core(0.1);
        assert_eq!(snap.fills.len(), 1);
        assert!(snap.cumulative_signed_volume < 0.0);

        sim.reset_flow();
        assert_eq!(sim.snapshot_core().cumulative_signed_volume, 0.0);
    }

    #[test]
    fn test_config_from_json_drives_simulation() {
        let config = SimConfig::from_json(r#"{"spawn_rate": 0, "spoof_intensity": 0, "walk_intensity": 0}"#)
            .unwrap();
        let mut sim = DepthSimulation::with_profile(21, 1.0, 100.0, 1, SeedProfile::default());
        let before = sim.snapshot_core().levels;
        sim.apply_config(config);
        sim.run_batch(100, 0.1);
        let after = sim.snapshot_core().levels;
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.bid_visible, b.bid_visible);
            assert_eq!(a.ask_visible, b.ask_visible);
        }
    }
}
