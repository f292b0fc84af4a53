// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Aggressor Generator

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::rng::RandomSource;
use crate::types::{Aggressor, Side};

/// Spawns synthetic aggressive orders near mid. Holds only id and count
/// bookkeeping; it never touches the ladder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggressorGenerator {
    next_id: u64,
    spawn_count: u32,
}

impl AggressorGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    /// One Bernoulli trial with probability `spawn_rate * dt` for `side`.
    ///
    /// Draw order: trial, then size, then target offset.
    pub fn maybe_spawn_side<R: RandomSource>(
        &mut self,
        side: Side,
        dt: f64,
        config: &SimConfig,
        mid_price: f64,
        tick_size: f64,
        rng: &mut R,
    ) -> Option<Aggressor> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if !rng.chance(config.spawn_rate * dt) {
            return None;
        }
        let size = rng.range(config.aggressor_size_min, config.aggressor_size_max);
        let offset_levels = rng.signed_unit() * config.target_offset_levels as f64;
        let target_price = mid_price + offset_levels * tick_size;

        let aggressor = Aggressor::new(self.next_id, side, size, target_price);
        self.next_id += 1;
        self.spawn_count = self.spawn_count.saturating_add(1);
        Some(aggressor)
    }

    /// Independent trials for the buy side then the sell side.
    pub fn maybe_spawn<R: RandomSource>(
        &mut self,
        dt: f64,
        config: &SimConfig,
        mid_price: f64,
        tick_size: f64,
        rng: &mut R,
    ) -> Vec<Aggressor> {
        [Side::Buy, Side::Sell]
            .into_iter()
            .filter_map(|side| self.maybe_spawn_side(side, dt, config, mid_price, tick_size, rng))
            .collect()
    }
}
