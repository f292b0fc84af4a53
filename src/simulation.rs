// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Simulation Core

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use wasm_bindgen::prelude::*;

use crate::aggressor::AggressorGenerator;
use crate::config::{SeedProfile, SimConfig};
use crate::depth::{cumulative_depth, cumulative_widths};
use crate::evolution::evolve;
use crate::flow::FlowStatistics;
use crate::ladder::Ladder;
use crate::matching::advance_in_flight;
use crate::rng::RandomSource;
use crate::types::*;

// ─── SimulationState ─────────────────────────────────────────────────────────

/// Everything the core owns between ticks. The host holds this value and
/// hands it back to [`tick`]; nothing lives in ambient globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub tick: u64,
    pub ladder: Ladder,
    pub flow: FlowStatistics,
    /// Last sanitized configuration applied; drives [`snapshot`].
    pub config: SimConfig,
    pub(crate) generator: AggressorGenerator,
    pub(crate) in_flight: Vec<Aggressor>,
    pub(crate) last_fills: Vec<ConsumptionResult>,
    /// Next id handed to a host-submitted aggressor.
    #[serde(default = "top_external_id")]
    pub(crate) next_external_id: u64,
}

impl SimulationState {
    pub fn from_ladder(ladder: Ladder) -> Self {
        Self {
            tick: 0,
            ladder,
            flow: FlowStatistics::new(),
            config: SimConfig::default(),
            generator: AggressorGenerator::new(),
            in_flight: Vec::new(),
            last_fills: Vec::new(),
            next_external_id: top_external_id(),
        }
    }

    pub fn in_flight(&self) -> &[Aggressor] {
        &self.in_flight
    }

    pub fn last_fills(&self) -> &[ConsumptionResult] {
        &self.last_fills
    }

    pub fn spawn_count(&self) -> u32 {
        self.generator.spawn_count()
    }

    /// Queue an externally created aggressor. Returns its id.
    ///
    /// External ids count down from the top so they never collide with
    /// generator ids, and are never reused within a run.
    pub fn submit(&mut self, side: Side, size: f64, target_price: f64) -> u64 {
        let id = self.next_external_id;
        self.next_external_id = if id > EXTERNAL_ID_BASE { id - 1 } else { top_external_id() };
        self.in_flight.push(Aggressor::new(id, side, size, target_price));
        id
    }
}

const EXTERNAL_ID_BASE: u64 = u64::MAX / 2;

fn top_external_id() -> u64 {
    u64::MAX
}

// ─── Pure Core ───────────────────────────────────────────────────────────────

/// Build the initial state with a seeded liquidity profile.
pub fn initialize<R: RandomSource>(
    level_count: usize,
    tick_size: f64,
    mid_price: f64,
    profile: &SeedProfile,
    rng: &mut R,
) -> SimulationState {
    SimulationState::from_ladder(Ladder::initialize(level_count, tick_size, mid_price, profile, rng))
}

/// Advance `state` in place by one step of `dt` seconds (before replay
/// scaling). Phase order: evolution, spawning, matching, flow window.
pub fn advance<R: RandomSource>(
    state: &mut SimulationState,
    dt: f64,
    config: &SimConfig,
    rng: &mut R,
) {
    let config = config.sanitized();
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let dt = dt * config.replay_speed;
    state.tick += 1;

    let evolution = evolve(&mut state.ladder, dt, &config, rng);

    let spawned = state.generator.maybe_spawn(
        dt,
        &config,
        state.ladder.mid_price(),
        state.ladder.tick_size(),
        rng,
    );
    let spawned_count = spawned.len();
    state.in_flight.extend(spawned);

    state.last_fills =
        advance_in_flight(&mut state.in_flight, &mut state.ladder, &mut state.flow, dt, &config);
    state.flow.close_tick();
    state.config = config;

    trace!(
        tick = state.tick,
        dt,
        spoofs_activated = evolution.spoofs_activated,
        spoofs_expired = evolution.spoofs_expired,
        spawned = spawned_count,
        resolved = state.last_fills.len(),
        in_flight = state.in_flight.len(),
        "tick"
    );
}

/// Value-in, value-out form of [`advance`].
pub fn tick<R: RandomSource>(
    mut state: SimulationState,
    dt: f64,
    config: &SimConfig,
    rng: &mut R,
) -> SimulationState {
    advance(&mut state, dt, config, rng);
    state
}

/// Read-only view for the renderer. Never exposes in-flight aggressors.
pub fn snapshot(state: &SimulationState) -> Snapshot {
    let cfg = &state.config;
    let ladder = &state.ladder;
    Snapshot {
        tick: state.tick,
        mid_price: ladder.mid_price(),
        tick_size: ladder.tick_size(),
        mid_index: ladder.mid_index(),
        levels: ladder.levels().to_vec(),
        cumulative_bid: cumulative_depth(ladder, BookSide::Bid, cfg.visible_depth_levels),
        cumulative_ask: cumulative_depth(ladder, BookSide::Ask, cfg.visible_depth_levels),
        bid_widths: cumulative_widths(ladder, BookSide::Bid, cfg.visible_depth_levels, cfg.max_volume_clamp),
        ask_widths: cumulative_widths(ladder, BookSide::Ask, cfg.visible_depth_levels, cfg.max_volume_clamp),
        cumulative_signed_volume: state.flow.cumulative_signed_volume(),
        recent_flow: state.flow.recent_flow(),
        in_flight_count: state.in_flight.len() as u32,
        iceberg_sensitivity: cfg.iceberg_sensitivity,
        fills: state.last_fills.clone(),
    }
}

/// Aggregate counters for dashboards and the bench runner.
pub fn stats(state: &SimulationState) -> SimStats {
    SimStats {
        tick: state.tick,
        cumulative_signed_volume: state.flow.cumulative_signed_volume(),
        total_buy_volume: state.flow.total_buy_volume(),
        total_sell_volume: state.flow.total_sell_volume(),
        fill_count: state.flow.fill_count(),
        overflow_count: state.flow.overflow_count(),
        spawn_count: state.generator.spawn_count(),
        active_spoofs: state.ladder.active_spoofs(),
        total_bid_depth: state.ladder.total_depth(BookSide::Bid),
        total_ask_depth: state.ladder.total_depth(BookSide::Ask),
    }
}

// ─── DepthSimulation (host handle) ───────────────────────────────────────────

/// Host-owned handle bundling state, configuration and a seeded PRNG.
#[wasm_bindgen]
pub struct DepthSimulation {
    pub(crate) state: SimulationState,
    pub(crate) config: SimConfig,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) seed: u32,
    pub(crate) level_count: usize,
    pub(crate) tick_size: f64,
    pub(crate) mid_price: f64,
    pub(crate) profile: SeedProfile,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl DepthSimulation {
    pub fn with_profile(
        level_count: usize,
        tick_size: f64,
        mid_price: f64,
        seed: u32,
        profile: SeedProfile,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let state = initialize(level_count, tick_size, mid_price, &profile, &mut rng);
        Self {
            state,
            config: SimConfig::default(),
            rng,
            seed,
            level_count,
            tick_size,
            mid_price,
            profile,
        }
    }

    pub fn tick_core(&mut self, dt: f64) -> Snapshot {
        advance(&mut self.state, dt, &self.config, &mut self.rng);
        snapshot(&self.state)
    }

    pub fn snapshot_core(&self) -> Snapshot {
        snapshot(&self.state)
    }

    pub fn stats_core(&self) -> SimStats {
        stats(&self.state)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration; it is sanitized and echoed into the state
    /// so snapshots reflect it before the next tick.
    pub fn apply_config(&mut self, config: SimConfig) {
        self.config = config.sanitized();
        self.state.config = self.config.clone();
    }

    pub fn update_config(&mut self, edit: impl FnOnce(&mut SimConfig)) {
        let mut config = self.config.clone();
        edit(&mut config);
        self.apply_config(config);
    }

    /// Rebuild from the original construction parameters and seed.
    pub fn reset_core(&mut self) {
        let config = self.config.clone();
        *self = Self::with_profile(
            self.level_count,
            self.tick_size,
            self.mid_price,
            self.seed,
            self.profile.clone(),
        );
        self.apply_config(config);
    }
}
